use super::{ExamSection, PracticeItem, PracticeKind, SectionName};

const LISTENING_SAMPLE: &str =
    "https://www.goethe.de/pro/relaunch/prf/de/GOETHE-ZERTIFIKAT_B1_HOEREN.mp3";

pub static SECTIONS: [ExamSection; 4] = [
    ExamSection {
        name: SectionName::Reading,
        duration_minutes: 65,
        parts_summary: "5 Teile",
        tasks: &[
            "Teil 1: Kurze Texte mit Multiple-Choice-Fragen",
            "Teil 2: Zuordnung von Überschriften zu Abschnitten",
            "Teil 3: Lückentext mit Wortauswahl",
            "Teil 4: Lange Texte mit Verständnisfragen",
        ],
        notes_heading: "Strategien",
        notes: &[
            "⏱️ Zeitmanagement: Max. 15 Min. pro Teil",
            "🔍 Zuerst Fragen lesen, dann Text scannen",
            "📌 Schlüsselwörter in Fragen markieren",
            "❌ Offensichtlich falsche Antworten sofort streichen",
        ],
        phrases: &[],
        practice_tip: None,
        sample_audio: None,
        practice_items: &[
            PracticeItem {
                kind: PracticeKind::ReadingPassage,
                prompt_text: "Lesen Sie den Text und beantworten Sie die Fragen:",
                support_text: Some(
                    "In Deutschland gibt es vier Jahreszeiten: Frühling, Sommer, Herbst und Winter. \
                     Der Frühling beginnt im März und endet im Mai. Viele Menschen freuen sich auf \
                     den Frühling, weil die Tage länger werden und die Blumen blühen. Im Sommer \
                     gehen viele Deutsche in den Urlaub, besonders an die Nordsee oder Ostsee.",
                ),
            },
            PracticeItem {
                kind: PracticeKind::ReadingPassage,
                prompt_text: "Welche Aussage passt zu welchem Abschnitt?",
                support_text: Some(
                    "1. Verkehrsmittel: In deutschen Städten gibt es Busse, Bahnen und U-Bahnen.\n\
                     2. Freizeitaktivitäten: Viele Deutsche treiben Sport oder gehen wandern.",
                ),
            },
            PracticeItem {
                kind: PracticeKind::ReadingPassage,
                prompt_text: "Was ist richtig? a) Parks sind selten b) Parks haben Spielplätze \
                              c) Parks sind immer geschlossen",
                support_text: Some("In deutschen Städten gibt es viele Parks. Diese sind oft..."),
            },
            PracticeItem {
                kind: PracticeKind::ReadingPassage,
                prompt_text: "Übersetzen Sie ins Deutsche: \
                              \"The park has many playgrounds for children.\"",
                support_text: None,
            },
        ],
    },
    ExamSection {
        name: SectionName::Writing,
        duration_minutes: 60,
        parts_summary: "2 Aufgaben",
        tasks: &[
            "Aufgabe 1: Formeller Brief/Email (80-100 Wörter)",
            "Aufgabe 2: Informeller Brief/Forumbeitrag (80-100 Wörter)",
        ],
        notes_heading: "Tipps",
        notes: &[
            "✍️ Mindestens 100 Wörter schreiben",
            "⏳ 20 Min. für Planung, 30 Min. für Text, 10 Min. für Korrektur",
            "📌 3-4 Absätze verwenden",
            "✅ Typische Redemittel lernen",
        ],
        phrases: &[],
        practice_tip: None,
        sample_audio: None,
        practice_items: &[
            PracticeItem {
                kind: PracticeKind::WritingTask,
                prompt_text: "Schreiben Sie eine formelle Email an eine Sprachschule (80-100 Wörter)",
                support_text: Some(
                    "- Fragen Sie nach einem Deutschkurs\n\
                     - Geben Sie Ihr Sprachniveau an\n\
                     - Fragen Sie nach dem Preis und dem Startdatum",
                ),
            },
            PracticeItem {
                kind: PracticeKind::WritingTask,
                prompt_text: "Schreiben Sie einen Brief an einen Freund über Ihren letzten Urlaub",
                support_text: Some(
                    "- Wohin sind Sie gefahren?\n\
                     - Was haben Sie gemacht?\n\
                     - Wie war das Wetter?\n\
                     - Wollen Sie wieder dorthin fahren?",
                ),
            },
            PracticeItem {
                kind: PracticeKind::WritingTask,
                prompt_text: "Write a formal email to a company requesting information about a product.",
                support_text: None,
            },
            PracticeItem {
                kind: PracticeKind::WritingTask,
                prompt_text: "Schreiben Sie die formelle Anrede für eine Firma.",
                support_text: Some("Sehr geehrte Damen und Herren, ..."),
            },
        ],
    },
    ExamSection {
        name: SectionName::Listening,
        duration_minutes: 40,
        parts_summary: "4 Teile",
        tasks: &[
            "Teil 1: Kurze Dialoge mit Bildern",
            "Teil 2: Radioansagen/Informationen",
            "Teil 3: Lange Dialoge mit Detailfragen",
            "Teil 4: Meinungen/Interviews verstehen",
        ],
        notes_heading: "Strategien",
        notes: &[
            "👂 Vor dem Hören: Fragen genau lesen",
            "✏️ Während des Hörens: Stichworte notieren",
            "🔁 Audio wird 2x abgespielt - beim ersten Mal Hauptidee, beim zweiten Mal Details",
            "❓ Unbekannte Wörter ignorieren - auf Kontext konzentrieren",
        ],
        phrases: &[],
        practice_tip: Some(
            "Hören Sie deutsche Podcasts, z.B. langsam gesprochene Nachrichten: \
             https://www.dw.com/de/deutsch-lernen/nachrichten/s-8030",
        ),
        sample_audio: Some(LISTENING_SAMPLE),
        practice_items: &[
            PracticeItem {
                kind: PracticeKind::ListeningTask,
                prompt_text: "Hören Sie die Durchsage und beantworten Sie die Fragen:",
                support_text: Some(
                    "1. Wann fährt der nächste Zug nach Berlin?\n\
                     2. Von welchem Gleis fährt der Zug?",
                ),
            },
            PracticeItem {
                kind: PracticeKind::ListeningTask,
                prompt_text: "Welche Antwort passt zu welchem Dialog?",
                support_text: Some(
                    "A) \"Entschuldigung, wo ist die Post?\"\n\
                     B) \"Ich möchte ein Ticket nach Hamburg kaufen\"",
                ),
            },
            PracticeItem {
                kind: PracticeKind::ListeningTask,
                prompt_text: "What is the main purpose of this announcement?",
                support_text: None,
            },
        ],
    },
    ExamSection {
        name: SectionName::Speaking,
        duration_minutes: 15,
        parts_summary: "3 Teile (mit Partner)",
        tasks: &[
            "Teil 1: Vorstellung (Name, Herkunft, Interessen)",
            "Teil 2: Thema präsentieren (2 Min. Monolog)",
            "Teil 3: Diskussion mit Partner",
        ],
        notes_heading: "Bewertungskriterien",
        notes: &[
            "🗣️ Aussprache und Verständlichkeit",
            "📚 Wortschatz und Grammatik",
            "💡 Ideenentwicklung und Logik",
            "🤝 Interaktion mit Partner",
        ],
        phrases: &[
            "Meiner Meinung nach... / Ich finde, dass...",
            "Was meinst du dazu? / Stimmt das deiner Ansicht nach?",
            "Einerseits... andererseits...",
            "Vielleicht sollten wir...",
        ],
        practice_tip: None,
        sample_audio: None,
        practice_items: &[
            PracticeItem {
                kind: PracticeKind::SpeakingPrompt,
                prompt_text: "Stellen Sie sich vor:",
                support_text: Some(
                    "- Name, Alter\n\
                     - Hobbys\n\
                     - Beruf/Studium\n\
                     - Warum lernen Sie Deutsch?",
                ),
            },
            PracticeItem {
                kind: PracticeKind::SpeakingPrompt,
                prompt_text: "Diskutieren Sie mit einem Partner:",
                support_text: Some(
                    "- Vor- und Nachteile des Lebens in der Stadt\n\
                     - Wie verbringen junge Leute ihre Freizeit?",
                ),
            },
            PracticeItem {
                kind: PracticeKind::SpeakingPrompt,
                prompt_text: "Beginnen Sie einen Satz mit \"Meiner Meinung nach...\"",
                support_text: Some("Meiner Meinung nach ist Deutsch lernen wichtig, weil..."),
            },
        ],
    },
];
