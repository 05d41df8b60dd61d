pub struct VocabularyCategory {
    pub title: &'static str,
    pub entries: &'static [(&'static str, &'static str)],
}

static CATEGORIES: [VocabularyCategory; 8] = [
    VocabularyCategory {
        title: "Wichtige Präpositionen (mit Fällen)",
        entries: &[
            ("wegen", "wegen + Genitiv (because of) - Wegen des Wetters..."),
            ("trotz", "trotz + Genitiv (despite) - Trotz der Kälte..."),
            ("während", "während + Genitiv (during) - Während des Kurses..."),
            ("gegenüber", "gegenüber + Dativ (opposite) - Gegenüber dem Bahnhof..."),
            ("bis", "bis + Akkusativ (until) - Bis nächsten Montag..."),
            ("durch", "durch + Akkusativ (through) - Durch den Park..."),
            ("für", "für + Akkusativ (for) - Für meine Prüfung..."),
            ("ohne", "ohne + Akkusativ (without) - Ohne mein Buch..."),
        ],
    },
    VocabularyCategory {
        title: "Essentielle Verben",
        entries: &[
            ("sich bewerben um", "to apply for (Bewirbst du dich um die Stelle?)"),
            ("erledigen", "to complete (Ich erledige meine Hausaufgaben)"),
            ("verschieben", "to postpone (Wir verschieben den Termin)"),
            ("verstehen", "to understand (Verstehst du die Frage?)"),
            ("mitteilen", "to inform (Teilen Sie mir bitte mit...)"),
            ("sich erkundigen nach", "to inquire about (Ich erkundige mich nach dem Kurs)"),
            ("zustimmen", "to agree (Stimmst du mir zu?)"),
            ("ablehnen", "to refuse (Sie lehnte die Einladung ab)"),
        ],
    },
    VocabularyCategory {
        title: "Zeitformen (Verb Tenses)",
        entries: &[
            ("Präsens", "Ich lerne Deutsch (I learn/am learning German)"),
            ("Perfekt", "Ich habe gelernt (I learned/have learned)"),
            ("Präteritum", "Ich lernte Deutsch (I learned German) - mostly written"),
            ("Plusquamperfekt", "Ich hatte gelernt (I had learned)"),
            ("Futur I", "Ich werde lernen (I will learn)"),
            ("Futur II", "Ich werde gelernt haben (I will have learned)"),
        ],
    },
    VocabularyCategory {
        title: "Konjunktionen (Conjunctions)",
        entries: &[
            ("weil", "because (Hauptsatz + Nebensatz) - Ich bleibe zu Hause, weil ich krank bin."),
            ("denn", "because (Hauptsatz + Hauptsatz) - Ich bleibe zu Hause, denn ich bin krank."),
            ("obwohl", "although - Obwohl es regnet, gehe ich spazieren."),
            ("damit", "so that - Ich lerne viel, damit ich die Prüfung bestehe."),
            ("wenn", "if/when - Wenn ich Zeit habe, lese ich ein Buch."),
            ("als", "when (past) - Als ich jung war, spielte ich Fußball."),
            ("während", "while - Während ich koche, höre ich Musik."),
            ("nachdem", "after - Nachdem ich gegessen habe, trinke ich Kaffee."),
        ],
    },
    VocabularyCategory {
        title: "Weil vs. Denn",
        entries: &[
            ("Position", "WEIL: Verb at end | DENN: Normal word order"),
            ("Example 1", "WEIL: Ich bin müde, weil ich spät ins Bett gegangen bin."),
            ("Example 2", "DENN: Ich bin müde, denn ich bin spät ins Bett gegangen."),
            ("Comma", "Both ALWAYS need a comma before them"),
            ("Usage", "DENN is more formal, WEIL is more common"),
        ],
    },
    VocabularyCategory {
        title: "Übergangswörter (Transition Words)",
        entries: &[
            ("zuerst", "first - Zuerst lese ich die Anleitung."),
            ("dann", "then - Dann beginne ich mit der Aufgabe."),
            ("anschließend", "afterwards - Anschließend überprüfe ich die Antworten."),
            ("schließlich", "finally - Schließlich gebe ich den Test ab."),
            ("deshalb", "therefore - Ich bin krank, deshalb bleibe ich im Bett."),
            ("trotzdem", "nevertheless - Es regnet, trotzdem gehe ich spazieren."),
        ],
    },
    VocabularyCategory {
        title: "Prüfungsschlüsselwörter",
        entries: &[
            ("die Aufgabe", "task/question - Lesen Sie die Aufgabe genau!"),
            ("die Lösung", "solution - Die Lösung steht auf Seite 10."),
            ("die Note", "grade - Ich habe eine gute Note bekommen."),
            ("bestehen", "to pass - Ich möchte die Prüfung bestehen."),
            ("durchfallen", "to fail - Leider ist er durchgefallen."),
            ("der Fehler", "mistake - Korrigieren Sie die Fehler."),
        ],
    },
    VocabularyCategory {
        title: "Formelle Redemittel (Formal Phrases)",
        entries: &[
            ("Sehr geehrte Damen und Herren,", "Dear Sir or Madam,"),
            ("mit freundlichen Grüßen", "Kind regards"),
            ("Ich möchte mich erkundigen...", "I would like to inquire..."),
            ("Ich wäre Ihnen dankbar, wenn...", "I would be grateful if..."),
            ("Ich beziehe mich auf...", "I'm referring to..."),
        ],
    },
];

pub fn vocabulary() -> &'static [VocabularyCategory] {
    &CATEGORIES
}

/// One verb conjugated for every pronoun across a few tenses.
pub struct Conjugation {
    pub verb: &'static str,
    pub tenses: [&'static str; 3],
    pub rows: [(&'static str, [&'static str; 3]); 6],
}

static LERNEN: Conjugation = Conjugation {
    verb: "lernen",
    tenses: ["Präsens", "Perfekt", "Futur I"],
    rows: [
        ("ich", ["lerne", "habe gelernt", "werde lernen"]),
        ("du", ["lernst", "hast gelernt", "wirst lernen"]),
        ("er/sie/es", ["lernt", "hat gelernt", "wird lernen"]),
        ("wir", ["lernen", "haben gelernt", "werden lernen"]),
        ("ihr", ["lernt", "habt gelernt", "werdet lernen"]),
        ("sie/Sie", ["lernen", "haben gelernt", "werden lernen"]),
    ],
};

pub fn conjugation_example() -> &'static Conjugation {
    &LERNEN
}

/// Fill-in-the-gap item for the weil/denn drill.
pub struct GapExercise {
    pub sentence: &'static str,
    pub answer: &'static str,
    pub explanation: &'static str,
}

impl GapExercise {
    pub fn check(&self, answer: &str) -> bool {
        answer.trim().to_lowercase() == self.answer
    }
}

static GAP_EXERCISES: [GapExercise; 4] = [
    GapExercise {
        sentence: "Ich nehme einen Regenschirm, ___ es regnet.",
        answer: "weil",
        explanation: "Verb 'regnet' am Ende → Nebensatz",
    },
    GapExercise {
        sentence: "Sie geht früh ins Bett, ___ sie müde ist.",
        answer: "weil",
        explanation: "Verb 'ist' am Ende → Nebensatz",
    },
    GapExercise {
        sentence: "Ich bleibe zu Hause, ___ ich bin krank.",
        answer: "denn",
        explanation: "'bin' direkt nach dem Subjekt → Hauptsatz",
    },
    GapExercise {
        sentence: "Ich bin müde, ___ ich bin spät ins Bett gegangen.",
        answer: "denn",
        explanation: "Normale Wortstellung nach 'denn' → Hauptsatz",
    },
];

pub fn gap_exercises() -> &'static [GapExercise] {
    &GAP_EXERCISES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gap_answers_ignore_case_and_whitespace() {
        let exercise = &gap_exercises()[0];
        assert!(exercise.check(" Weil "));
        assert!(exercise.check("WEIL"));
        assert!(!exercise.check("denn"));
        assert!(!exercise.check(""));
    }

    #[test]
    fn gap_answers_are_weil_or_denn() {
        for exercise in gap_exercises() {
            assert!(matches!(exercise.answer, "weil" | "denn"));
            assert!(exercise.sentence.contains("___"));
        }
    }

    #[test]
    fn lernen_is_conjugated_for_every_pronoun() {
        let table = conjugation_example();
        assert_eq!(table.verb, "lernen");
        assert_eq!(table.tenses, ["Präsens", "Perfekt", "Futur I"]);

        let (pronoun, forms) = table.rows[1];
        assert_eq!(pronoun, "du");
        assert_eq!(forms, ["lernst", "hast gelernt", "wirst lernen"]);
        assert!(table.rows.iter().all(|(_, forms)| forms[1].ends_with("gelernt")));
    }

    #[test]
    fn no_category_is_empty() {
        for category in vocabulary() {
            assert!(!category.entries.is_empty(), "{} is empty", category.title);
        }
    }
}
