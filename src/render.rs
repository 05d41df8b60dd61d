use teloxide::utils::html::{bold, escape, italic, link};

use crate::coach::{ErrorKind, FeedbackResult};
use crate::exam::info::{self, StudyDay};
use crate::exam::vocabulary::{Conjugation, GapExercise, VocabularyCategory};
use crate::exam::writing::{WritingTemplate, WRITING_TIPS};
use crate::exam::{list_sections, ExamSection, PracticeItem};

/// Telegram counts its 4096 limit in UTF-16 code units; escaping can grow text.
pub const MESSAGE_CHUNK_UNITS: usize = 3000;

fn bullet_list(items: &[&str]) -> String {
    items
        .iter()
        .map(|item| format!("• {}", escape(item)))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn exam_overview() -> String {
    let parts = list_sections()
        .iter()
        .map(|section| {
            format!(
                "{}\n{} min | {}",
                bold(&section.name.label()),
                section.duration_minutes,
                escape(section.parts_summary)
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!("{}\n\n{parts}", bold("Prüfungsteile"))
}

pub fn section_overview(section: &ExamSection) -> String {
    let mut text = format!(
        "{}\n⏱️ {} {} Minuten\n\n{}\n{}\n\n{}\n{}",
        bold(&section.name.label()),
        bold("Dauer:"),
        section.duration_minutes,
        bold("Aufgaben:"),
        bullet_list(section.tasks),
        bold(&format!("{}:", section.notes_heading)),
        bullet_list(section.notes),
    );

    if !section.phrases.is_empty() {
        text.push_str(&format!(
            "\n\n{}\n{}",
            bold("Nützliche Redemittel:"),
            bullet_list(section.phrases)
        ));
    }
    if let Some(tip) = section.practice_tip {
        text.push_str(&format!("\n\n{}\n{}", bold("Übungstipp:"), escape(tip)));
    }

    let task_count = section.tasks.len() as u32;
    let review = section.default_review_minutes();
    if let Ok(minutes) = info::time_per_task(section.duration_minutes, task_count, review) {
        let timing = timing(section, task_count, review, minutes);
        text.push_str(&format!("\n\n{timing}"));
    }

    text
}

pub fn timing(
    section: &ExamSection,
    task_count: u32,
    review_minutes: u32,
    minutes: f64,
) -> String {
    format!(
        "{}\n{} Aufgaben in {} Minuten\n\
         Empfohlene Zeit pro Aufgabe: {minutes:.1} Minuten\n\
         Korrekturzeit: {review_minutes} Minuten",
        bold("⏱️ Zeitmanagement"),
        task_count,
        section.duration_minutes,
    )
}

pub fn practice_item(section: &ExamSection, item: &PracticeItem) -> String {
    let mut text = format!(
        "{}\n\n{}",
        bold(&format!("{} Übung", section.name.german())),
        bold(&escape(item.prompt_text))
    );
    if let Some(support) = item.support_text {
        text.push_str(&format!(
            "\n\n{}\n{}",
            italic(&format!("{}:", item.kind.support_heading())),
            escape(support)
        ));
    }
    if let Some(url) = section.sample_audio {
        text.push_str(&format!("\n\n🎧 {}", link(url, "Hörbeispiel abspielen")));
    }
    text
}

pub fn feedback(result: &FeedbackResult) -> Vec<String> {
    match result {
        FeedbackResult::Success { response_text } => {
            split_message(response_text, MESSAGE_CHUNK_UNITS)
                .iter()
                .enumerate()
                .map(|(i, chunk)| {
                    if i == 0 {
                        format!("🎯 {}\n{}", bold("Antwort:"), escape(chunk))
                    } else {
                        escape(chunk)
                    }
                })
                .collect()
        }
        FeedbackResult::Failure { reason } => vec![failure_notice(*reason)],
    }
}

/// Both failure kinds read the same to the learner.
pub fn failure_notice(_reason: ErrorKind) -> String {
    "⚠️ Leider konnte ich gerade keine Antwort bekommen. Versuch es gleich noch einmal.".to_string()
}

pub fn follow_ups(drills: &[&str]) -> Option<String> {
    if drills.is_empty() {
        return None;
    }
    Some(format!("{}\n{}", bold("🔍 Weiterführende Übungen:"), bullet_list(drills)))
}

pub fn vocabulary_category(category: &VocabularyCategory) -> String {
    let entries = category
        .entries
        .iter()
        .map(|(word, meaning)| format!("{}\n{}", bold(&escape(word)), escape(meaning)))
        .collect::<Vec<_>>()
        .join("\n\n");
    format!("📌 {}\n\n{entries}", bold(category.title))
}

pub fn conjugation(table: &Conjugation) -> String {
    let header = format!("{:<10}| {}", "Pronomen", table.tenses.join(" | "));
    let rows = table
        .rows
        .iter()
        .map(|(pronoun, forms)| format!("{pronoun:<10}| {}", forms.join(" | ")))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "📝 {}\n<pre>{}\n{}</pre>",
        bold(&format!("Verbkonjugation: {}", table.verb)),
        escape(&header),
        escape(&rows)
    )
}

pub fn writing_template(template: &WritingTemplate) -> String {
    format!(
        "{}\n\n{}\n{}\n\n{}\n<pre>{}</pre>",
        bold(template.name),
        bold("Struktur:"),
        bullet_list(template.structure),
        bold("Beispiel:"),
        escape(template.example)
    )
}

pub fn writing_tips() -> String {
    let tips = WRITING_TIPS
        .iter()
        .enumerate()
        .map(|(i, tip)| format!("{}. {}", i + 1, escape(tip)))
        .collect::<Vec<_>>()
        .join("\n");
    format!("{}\n{tips}", bold("Tipps für das Schreiben"))
}

pub fn exam_info() -> String {
    let passing = info::passing_requirements();
    let table = info::scoring_table()
        .iter()
        .map(|row| {
            format!(
                "{}: {} Punkte, bestanden ab {} | {} min",
                row.section.german(),
                row.points,
                row.pass_mark,
                row.section.section().duration_minutes
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "{}\n\n{}\n{}\n\n{}\n{}",
        bold("Prüfungsinformationen"),
        escape(passing.description),
        bullet_list(passing.requirements),
        bold("Bewertung:"),
        escape(&table)
    )
}

pub fn study_plan(days: &[StudyDay]) -> String {
    let days = days
        .iter()
        .map(|day| {
            let blocks = day
                .blocks
                .iter()
                .map(|block| format!("⏰ {}h - {}", block.hours, escape(block.topic)))
                .collect::<Vec<_>>()
                .join("\n");
            format!("{}\n{blocks}", bold(day.title))
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!("{}\n\n{days}", bold("2-Tage-Lernplan"))
}

pub fn gap_exercise(number: usize, exercise: &GapExercise) -> String {
    format!(
        "{} {}\n{}",
        bold(&format!("{number}.")),
        escape(exercise.sentence),
        italic("Ergänzen Sie mit 'weil' oder 'denn'")
    )
}

pub fn gap_verdict(exercise: &GapExercise, correct: bool) -> String {
    if correct {
        format!("✅ Richtig! {}", escape(exercise.explanation))
    } else {
        format!("❌ Falsch! Richtige Antwort: {}", bold(exercise.answer))
    }
}

pub fn countdown(days: i64) -> String {
    match days {
        0 => "Deine Prüfung ist heute. Viel Erfolg! 🍀".to_string(),
        1 => "Noch 1 Tag bis zur Prüfung!".to_string(),
        n => format!("Noch {n} Tage bis zur Prüfung!"),
    }
}

/// Splits on char boundaries, preferring line breaks, so that no chunk
/// exceeds `max_units` UTF-16 code units.
pub fn split_message(text: &str, max_units: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for line in text.split_inclusive('\n') {
        let line_len = line.encode_utf16().count();
        if current_len + line_len > max_units && !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if line_len > max_units {
            for c in line.chars() {
                if current_len + c.len_utf16() > max_units && !current.is_empty() {
                    chunks.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                current.push(c);
                current_len += c.len_utf16();
            }
        } else {
            current.push_str(line);
            current_len += line_len;
        }
    }
    if !current.is_empty() || chunks.is_empty() {
        chunks.push(current);
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exam::SectionName;

    #[test]
    fn both_failure_kinds_read_the_same() {
        assert_eq!(
            failure_notice(ErrorKind::ProviderError),
            failure_notice(ErrorKind::ProviderUnavailable)
        );
    }

    #[test]
    fn successful_feedback_is_escaped_but_complete() {
        let messages = feedback(&FeedbackResult::Success {
            response_text: "Use <weil> & more subordinate clauses.".to_string(),
        });
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("Use &lt;weil&gt; &amp; more subordinate clauses."));
    }

    #[test]
    fn section_overview_shows_duration_and_timing() {
        let text = section_overview(SectionName::Reading.section());
        assert!(text.contains("65 Minuten"));
        assert!(
            text.contains("Empfohlene Zeit pro Aufgabe: 16.2 Minuten")
                || text.contains("Empfohlene Zeit pro Aufgabe: 16.3 Minuten")
        );

        let writing = section_overview(SectionName::Writing.section());
        assert!(writing.contains("Korrekturzeit: 5 Minuten"));
    }

    #[test]
    fn long_answers_are_split_without_losing_text() {
        let text = "Zeile\n".repeat(1000) + &"x".repeat(2500);
        let chunks = split_message(&text, 1000);
        assert!(chunks.iter().all(|c| c.encode_utf16().count() <= 1000));
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn emoji_answers_fit_telegram_limit() {
        let text = "😀".repeat(MESSAGE_CHUNK_UNITS);
        let messages = feedback(&FeedbackResult::Success {
            response_text: text.clone(),
        });

        assert_eq!(messages.len(), 2);
        assert!(messages.iter().all(|m| m.encode_utf16().count() <= 4096));
        assert_eq!(split_message(&text, MESSAGE_CHUNK_UNITS).concat(), text);
    }

    #[test]
    fn listening_practice_links_the_recording() {
        let listening = SectionName::Listening.section();
        let text = practice_item(listening, &listening.practice_items[0]);
        assert!(text.contains("GOETHE-ZERTIFIKAT_B1_HOEREN.mp3"));

        let reading = SectionName::Reading.section();
        assert!(!practice_item(reading, &reading.practice_items[0]).contains("🎧"));
    }

    #[test]
    fn conjugation_table_lists_every_pronoun() {
        let text = conjugation(crate::exam::vocabulary::conjugation_example());
        assert!(text.contains("Verbkonjugation: lernen"));
        assert!(text.contains("Präsens | Perfekt | Futur I"));
        assert!(text.contains("er/sie/es | lernt | hat gelernt | wird lernen"));
        assert!(text.contains("werdet lernen"));
    }

    #[test]
    fn short_text_stays_in_one_chunk() {
        assert_eq!(split_message("kurz", 10), vec!["kurz".to_string()]);
        assert_eq!(split_message("", 10), vec![String::new()]);
    }

    #[test]
    fn follow_ups_are_skipped_when_empty() {
        assert!(follow_ups(&[]).is_none());
        assert!(follow_ups(&["Dialoge verstehen"]).unwrap().contains("Dialoge verstehen"));
    }

    #[test]
    fn countdown_wording() {
        assert_eq!(countdown(2), "Noch 2 Tage bis zur Prüfung!");
        assert!(countdown(0).contains("heute"));
    }
}
