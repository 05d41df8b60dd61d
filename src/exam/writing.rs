pub struct WritingTemplate {
    pub name: &'static str,
    pub structure: &'static [&'static str],
    pub example: &'static str,
}

static TEMPLATES: [WritingTemplate; 2] = [
    WritingTemplate {
        name: "Formeller Brief",
        structure: &[
            "Ort, Datum (rechtsbündig)",
            "Betreff: (Betreffzeile)",
            "Sehr geehrte Damen und Herren,",
            "Einleitung: Grund des Schreibens",
            "Hauptteil: Details, Fragen stellen",
            "Schluss: Um Antwort bitten, danken",
            "Mit freundlichen Grüßen,",
            "Ihr Name",
        ],
        example: "München, 15. März 2024

Betreff: Bewerbung für Praktikumsstelle

Sehr geehrte Damen und Herren,

mit großem Interesse habe ich Ihre Anzeige für ein Praktikum gelesen.
Ich möchte mich für diese Stelle bewerben.

Ich studiere derzeit Wirtschaft an der Universität München und
suche ein Praktikum im Bereich Marketing. In meinem Studium habe ich
schon mehrere Kurse in diesem Bereich belegt.

Über eine positive Rückmeldung würde ich mich sehr freuen.
Für weitere Informationen stehe ich gerne zur Verfügung.

Mit freundlichen Grüßen,
Anna Müller",
    },
    WritingTemplate {
        name: "Informelle Email",
        structure: &[
            "Betreff: (Betreffzeile)",
            "Liebe/Lieber [Name],",
            "Einleitung: Begrüßung, Grund des Schreibens",
            "Hauptteil: Neuigkeiten, Fragen",
            "Schluss: Wunsch/Abschied",
            "Viele Grüße,",
            "Dein Name",
        ],
        example: "Betreff: Treffen am Wochenende

Liebe Sarah,

wie geht's dir? Ich hoffe, alles ist gut bei dir.

Ich schreibe dir, weil ich wissen wollte, ob du am Samstag Zeit hast.
Ich möchte mit dir ins Kino gehen. Der neue Marvel-Film läuft jetzt.

Was hältst du davon? Lass mich bitte wissen, ob du kommen kannst.

Viele Grüße,
Deine Lisa",
    },
];

pub const WRITING_TIPS: [&str; 5] = [
    "Struktur immer einhalten (Anrede, Einleitung, Hauptteil, Schluss)",
    "Mindestens 80 Wörter schreiben",
    "Auf Formal/Informal achten",
    "5 Minuten für Planung verwenden",
    "10 Minuten für Korrektur am Ende",
];

pub fn writing_templates() -> &'static [WritingTemplate] {
    &TEMPLATES
}
