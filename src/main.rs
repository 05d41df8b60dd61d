mod coach;
mod config;
mod exam;
mod render;

use std::sync::Arc;

use chrono::Local;
use coach::{
    chatgpt::ChatGptGenerator, offline::OfflineGenerator, ollama::OllamaGenerator, Coach,
    FeedbackRequest, FeedbackResult, InFlight, TextGenerator,
};
use config::{Config, ProviderKind};
use dotenv::dotenv;
use exam::{info, vocabulary, writing, SectionName};
use teloxide::{
    dispatching::{dialogue::InMemStorage, UpdateHandler},
    prelude::*,
    types::{ChatAction, KeyboardButton, KeyboardMarkup, ParseMode},
};

type CoachDialogue = Dialogue<State, InMemStorage<State>>;
type HandlerError = Box<dyn std::error::Error + Send + Sync>;
type HandlerResult = Result<(), HandlerError>;

#[derive(Clone, Default)]
pub enum State {
    #[default]
    Start,
    ReceiveMenuChoice,
    SectionMenu {
        section: SectionName,
    },
    ReceiveWritingSample {
        section: SectionName,
    },
    ReceiveQuestion {
        section: Option<SectionName>,
    },
    ReceiveTaskTiming {
        section: SectionName,
    },
    ReceiveExamDate,
    GapExercise {
        question_number: usize,
        score: usize,
    },
}

#[tokio::main]
async fn main() {
    let env_file_loaded = dotenv().is_ok();

    pretty_env_logger::init();
    log::info!("Starting B1 coach bot...");
    if !env_file_loaded {
        log::debug!("No .env file found, using the process environment only");
    }

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            log::error!("Invalid configuration: {err}");
            std::process::exit(1);
        }
    };

    let generator: Box<dyn TextGenerator> = match config.provider {
        ProviderKind::Ollama => {
            log::info!("Using Ollama at {} with {}", config.ollama_host, config.model);
            Box::new(OllamaGenerator::new(&config.ollama_host))
        }
        ProviderKind::ChatGpt => {
            log::info!("Using ChatGPT with {}", config.model);
            Box::new(ChatGptGenerator::new(
                config.chatgpt_api_key.clone().unwrap_or_default(),
                config.timeout,
            ))
        }
        ProviderKind::Offline => {
            log::info!("Using offline answers, no model will be contacted");
            Box::new(OfflineGenerator)
        }
    };

    let coach = Arc::new(Coach::new(
        generator,
        config.generation_options(),
        config.timeout,
    ));

    let bot = Bot::from_env();

    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![InMemStorage::<State>::new(), coach])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}

fn schema() -> UpdateHandler<HandlerError> {
    Update::filter_message()
        .enter_dialogue::<Message, InMemStorage<State>, State>()
        .branch(dptree::filter(|msg: Message| msg.text() == Some("/start")).endpoint(start))
        .branch(dptree::case![State::Start].endpoint(start))
        .branch(dptree::case![State::ReceiveMenuChoice].endpoint(receive_menu_choice))
        .branch(dptree::case![State::SectionMenu { section }].endpoint(section_menu))
        .branch(
            dptree::case![State::ReceiveWritingSample { section }]
                .endpoint(receive_writing_sample),
        )
        .branch(dptree::case![State::ReceiveQuestion { section }].endpoint(receive_question))
        .branch(dptree::case![State::ReceiveTaskTiming { section }].endpoint(receive_task_timing))
        .branch(dptree::case![State::ReceiveExamDate].endpoint(receive_exam_date))
        .branch(
            dptree::case![State::GapExercise {
                question_number,
                score
            }]
            .endpoint(gap_exercise),
        )
}

const VOCABULARY: &str = "📌 Wortschatz";
const TEMPLATES: &str = "✍️ Vorlagen";
const EXAM_INFO: &str = "ℹ️ Prüfungsinfo";
const STUDY_PLAN: &str = "🗓️ Lernplan";
const GAP_EXERCISE: &str = "🧩 weil/denn";
const EXAM_DATE: &str = "📅 Prüfungsdatum";
const ASK_QUESTION: &str = "🤖 Frage stellen";

const NEW_EXERCISE: &str = "💡 Neue Übung";
const GET_FEEDBACK: &str = "✏️ Feedback erhalten";
const TIME_CALCULATOR: &str = "⏱️ Zeitrechner";
const BACK: &str = "⬅️ Zurück";

fn main_menu_keyboard() -> KeyboardMarkup {
    let sections = SectionName::ALL
        .iter()
        .map(|section| KeyboardButton::new(section.label()))
        .collect::<Vec<_>>();

    KeyboardMarkup::new(vec![
        sections[..2].to_vec(),
        sections[2..].to_vec(),
        vec![KeyboardButton::new(VOCABULARY), KeyboardButton::new(TEMPLATES)],
        vec![KeyboardButton::new(EXAM_INFO), KeyboardButton::new(STUDY_PLAN)],
        vec![KeyboardButton::new(GAP_EXERCISE), KeyboardButton::new(EXAM_DATE)],
        vec![KeyboardButton::new(ASK_QUESTION)],
    ])
}

fn section_keyboard(section: SectionName) -> KeyboardMarkup {
    let mut first_row = vec![KeyboardButton::new(NEW_EXERCISE)];
    if section == SectionName::Writing {
        first_row.push(KeyboardButton::new(GET_FEEDBACK));
    }

    KeyboardMarkup::new(vec![
        first_row,
        vec![
            KeyboardButton::new(TIME_CALCULATOR),
            KeyboardButton::new(ASK_QUESTION),
        ],
        vec![KeyboardButton::new(BACK)],
    ])
}

fn back_keyboard() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![vec![KeyboardButton::new(BACK)]])
}

async fn send_html(bot: &Bot, chat_id: ChatId, text: String) -> HandlerResult {
    bot.send_message(chat_id, text)
        .parse_mode(ParseMode::Html)
        .await?;
    Ok(())
}

async fn show_main_menu(bot: &Bot, dialogue: &CoachDialogue, chat_id: ChatId) -> HandlerResult {
    bot.send_message(chat_id, "Was möchtest du üben?")
        .reply_markup(main_menu_keyboard())
        .await?;
    dialogue.update(State::ReceiveMenuChoice).await?;
    Ok(())
}

async fn show_section_menu(
    bot: &Bot,
    dialogue: &CoachDialogue,
    chat_id: ChatId,
    section: SectionName,
) -> HandlerResult {
    bot.send_message(chat_id, "Wie geht es weiter?")
        .reply_markup(section_keyboard(section))
        .await?;
    dialogue.update(State::SectionMenu { section }).await?;
    Ok(())
}

/// Claims the chat's request slot, or tells the learner to wait.
async fn claim_slot<'a>(
    bot: &Bot,
    coach: &'a Coach,
    chat_id: ChatId,
) -> Result<Option<InFlight<'a>>, HandlerError> {
    // Unreachable with the default per-chat distribution; guards other setups.
    let Some(in_flight) = coach.try_begin(chat_id.0) else {
        bot.send_message(
            chat_id,
            "⏳ Ich arbeite noch an deiner letzten Anfrage. Einen Moment bitte!",
        )
        .await?;
        return Ok(None);
    };

    // The typing indicator is cosmetic, so a failure here is ignored
    let _ = bot.send_chat_action(chat_id, ChatAction::Typing).await;
    Ok(Some(in_flight))
}

async fn send_feedback(bot: &Bot, chat_id: ChatId, result: &FeedbackResult) -> HandlerResult {
    for message in render::feedback(result) {
        send_html(bot, chat_id, message).await?;
    }
    Ok(())
}

const GREETING_TEXT: &str = "Hallo! Ich bin dein Coach für das Goethe-Zertifikat B1. \
Ich zeige dir die Prüfungsteile, Wortschatz und Vorlagen, gebe dir Übungen \
und beantworte deine Fragen zur Prüfung.";

async fn start(bot: Bot, dialogue: CoachDialogue, msg: Message) -> HandlerResult {
    bot.send_message(msg.chat.id, GREETING_TEXT).await?;
    send_html(&bot, msg.chat.id, render::exam_overview()).await?;

    show_main_menu(&bot, &dialogue, msg.chat.id).await
}

async fn receive_menu_choice(bot: Bot, dialogue: CoachDialogue, msg: Message) -> HandlerResult {
    let chat_id = msg.chat.id;
    match msg.text() {
        Some(VOCABULARY) => {
            for category in vocabulary::vocabulary() {
                send_html(&bot, chat_id, render::vocabulary_category(category)).await?;
            }
            let conjugation = render::conjugation(vocabulary::conjugation_example());
            send_html(&bot, chat_id, conjugation).await?;
        }
        Some(TEMPLATES) => {
            for template in writing::writing_templates() {
                send_html(&bot, chat_id, render::writing_template(template)).await?;
            }
            send_html(&bot, chat_id, render::writing_tips()).await?;
        }
        Some(EXAM_INFO) => {
            send_html(&bot, chat_id, render::exam_info()).await?;
        }
        Some(STUDY_PLAN) => {
            send_html(&bot, chat_id, render::study_plan(info::study_plan())).await?;
        }
        Some(GAP_EXERCISE) => {
            bot.send_message(chat_id, "Ergänzen Sie mit 'weil' oder 'denn':")
                .await?;
            ask_gap_question(&bot, chat_id, 0).await?;
            dialogue
                .update(State::GapExercise {
                    question_number: 1,
                    score: 0,
                })
                .await?;
        }
        Some(EXAM_DATE) => {
            bot.send_message(chat_id, "Wann ist deine Prüfung? (z.B. 21.11.2026)")
                .reply_markup(back_keyboard())
                .await?;
            dialogue.update(State::ReceiveExamDate).await?;
        }
        Some(ASK_QUESTION) => {
            bot.send_message(
                chat_id,
                "Stelle eine Frage zur B1-Prüfung, z.B. \"Wie kann ich im Hörverstehen besser werden?\"",
            )
            .reply_markup(back_keyboard())
            .await?;
            dialogue.update(State::ReceiveQuestion { section: None }).await?;
        }
        Some(text) => match exam::get_section(text) {
            Ok(section) => {
                send_html(&bot, chat_id, render::section_overview(section)).await?;
                show_section_menu(&bot, &dialogue, chat_id, section.name).await?;
            }
            Err(_) => {
                bot.send_message(chat_id, "Bitte wähle eine der Optionen unten.")
                    .reply_markup(main_menu_keyboard())
                    .await?;
            }
        },
        None => {
            bot.send_message(chat_id, "Bitte antworte mit Text.").await?;
        }
    }
    Ok(())
}

async fn section_menu(
    bot: Bot,
    dialogue: CoachDialogue,
    section: SectionName,
    msg: Message,
) -> HandlerResult {
    let chat_id = msg.chat.id;
    match msg.text() {
        Some(NEW_EXERCISE) => {
            let exam_section = section.section();
            let item = coach::pick_practice_item(exam_section, &mut rand::thread_rng());
            send_html(&bot, chat_id, render::practice_item(exam_section, item)).await?;

            let hint = if section == SectionName::Writing {
                "Schreib deine Antwort und tippe dann auf \"Feedback erhalten\"."
            } else {
                "Schreib deine Antwort einfach hier in den Chat."
            };
            bot.send_message(chat_id, hint)
                .reply_markup(section_keyboard(section))
                .await?;
        }
        Some(GET_FEEDBACK) if section == SectionName::Writing => {
            bot.send_message(chat_id, "Schick mir deinen Text (80-100 Wörter).")
                .reply_markup(back_keyboard())
                .await?;
            dialogue
                .update(State::ReceiveWritingSample { section })
                .await?;
        }
        Some(TIME_CALCULATOR) => {
            bot.send_message(
                chat_id,
                format!(
                    "Anzahl der Aufgaben (1-{}) und Korrekturzeit in Minuten (0-{}), z.B. \"{} {}\"",
                    info::MAX_TASKS,
                    info::MAX_REVIEW_MINUTES,
                    section.section().tasks.len(),
                    section.section().default_review_minutes()
                ),
            )
            .reply_markup(back_keyboard())
            .await?;
            dialogue.update(State::ReceiveTaskTiming { section }).await?;
        }
        Some(ASK_QUESTION) => {
            bot.send_message(
                chat_id,
                format!("Was möchtest du über {} wissen?", section.german()),
            )
            .reply_markup(back_keyboard())
            .await?;
            dialogue
                .update(State::ReceiveQuestion {
                    section: Some(section),
                })
                .await?;
        }
        Some(BACK) => {
            show_main_menu(&bot, &dialogue, chat_id).await?;
        }
        Some(_) => {
            bot.send_message(
                chat_id,
                "Danke, deine Antwort ist notiert! Wenn du unsicher bist, tippe auf \"Frage stellen\".",
            )
            .reply_markup(section_keyboard(section))
            .await?;
        }
        None => {
            bot.send_message(chat_id, "Bitte antworte mit Text.").await?;
        }
    }
    Ok(())
}

async fn receive_writing_sample(
    bot: Bot,
    dialogue: CoachDialogue,
    section: SectionName,
    coach: Arc<Coach>,
    msg: Message,
) -> HandlerResult {
    let chat_id = msg.chat.id;
    let text = msg.text().unwrap_or_default();
    if text == BACK {
        return show_section_menu(&bot, &dialogue, chat_id, section).await;
    }

    match FeedbackRequest::writing_sample(section, text) {
        Ok(request) => {
            if let Some(_in_flight) = claim_slot(&bot, &coach, chat_id).await? {
                let result = coach.request_feedback(&request).await;
                send_feedback(&bot, chat_id, &result).await?;
            }
            show_section_menu(&bot, &dialogue, chat_id, section).await
        }
        Err(_) => {
            bot.send_message(chat_id, "Bitte schick mir deinen Text als Nachricht.")
                .await?;
            Ok(())
        }
    }
}

async fn receive_question(
    bot: Bot,
    dialogue: CoachDialogue,
    section: Option<SectionName>,
    coach: Arc<Coach>,
    msg: Message,
) -> HandlerResult {
    let chat_id = msg.chat.id;
    let text = msg.text().unwrap_or_default();

    if text != BACK {
        if let Some(_in_flight) = claim_slot(&bot, &coach, chat_id).await? {
            let result = match coach.ask(section, text).await {
                Ok(result) => result,
                Err(err) => {
                    log::debug!("Rejected question from {}: {err}", chat_id.0);
                    bot.send_message(chat_id, "Bitte stelle deine Frage als Text.")
                        .await?;
                    return Ok(());
                }
            };

            send_feedback(&bot, chat_id, &result).await?;
            if matches!(result, FeedbackResult::Success { .. }) {
                if let Some(drills) = render::follow_ups(coach::follow_up_exercises(text)) {
                    send_html(&bot, chat_id, drills).await?;
                }
            }
        }
    }

    match section {
        Some(section) => show_section_menu(&bot, &dialogue, chat_id, section).await,
        None => show_main_menu(&bot, &dialogue, chat_id).await,
    }
}

fn parse_timing(text: &str, default_review: u32) -> Option<(u32, u32)> {
    let mut numbers = text.split_whitespace().map(str::parse::<u32>);
    let task_count = numbers.next()?.ok()?;
    let review = match numbers.next() {
        Some(review) => review.ok()?,
        None => default_review,
    };
    numbers.next().is_none().then_some((task_count, review))
}

async fn receive_task_timing(
    bot: Bot,
    dialogue: CoachDialogue,
    section: SectionName,
    msg: Message,
) -> HandlerResult {
    let chat_id = msg.chat.id;
    let text = msg.text().unwrap_or_default();
    if text == BACK {
        return show_section_menu(&bot, &dialogue, chat_id, section).await;
    }

    let exam_section = section.section();
    let Some((task_count, review)) = parse_timing(text, exam_section.default_review_minutes())
    else {
        bot.send_message(chat_id, "Bitte gib eine oder zwei Zahlen ein, z.B. \"4 5\".")
            .await?;
        return Ok(());
    };

    match info::time_per_task(exam_section.duration_minutes, task_count, review) {
        Ok(minutes) => {
            send_html(
                &bot,
                chat_id,
                render::timing(exam_section, task_count, review, minutes),
            )
            .await?;
            show_section_menu(&bot, &dialogue, chat_id, section).await
        }
        Err(err) => {
            log::debug!("Rejected timing input {text:?}: {err}");
            bot.send_message(
                chat_id,
                format!(
                    "Das passt nicht: 1-{} Aufgaben und eine Korrekturzeit unter {} Minuten.",
                    info::MAX_TASKS,
                    exam_section.duration_minutes.min(info::MAX_REVIEW_MINUTES + 1)
                ),
            )
            .await?;
            Ok(())
        }
    }
}

async fn receive_exam_date(bot: Bot, dialogue: CoachDialogue, msg: Message) -> HandlerResult {
    let chat_id = msg.chat.id;
    let text = msg.text().unwrap_or_default();
    if text == BACK {
        return show_main_menu(&bot, &dialogue, chat_id).await;
    }

    let today = Local::now().date_naive();
    match info::parse_exam_date(text, today) {
        Ok(exam_date) => {
            bot.send_message(chat_id, render::countdown(info::days_until(exam_date, today)))
                .await?;
            show_main_menu(&bot, &dialogue, chat_id).await
        }
        Err(_) => {
            bot.send_message(
                chat_id,
                "Bitte gib ein Datum ab heute ein, z.B. 21.11.2026.",
            )
            .await?;
            Ok(())
        }
    }
}

async fn ask_gap_question(bot: &Bot, chat_id: ChatId, index: usize) -> HandlerResult {
    let exercise = &vocabulary::gap_exercises()[index];
    bot.send_message(chat_id, render::gap_exercise(index + 1, exercise))
        .parse_mode(ParseMode::Html)
        .reply_markup(KeyboardMarkup::new(vec![vec![
            KeyboardButton::new("weil"),
            KeyboardButton::new("denn"),
        ]]))
        .await?;
    Ok(())
}

async fn gap_exercise(
    bot: Bot,
    dialogue: CoachDialogue,
    (question_number, score): (usize, usize),
    msg: Message,
) -> HandlerResult {
    let chat_id = msg.chat.id;
    let exercises = vocabulary::gap_exercises();

    let Some(answer) = msg.text() else {
        bot.send_message(chat_id, "Bitte antworte mit 'weil' oder 'denn'.")
            .await?;
        return Ok(());
    };

    let mut current_score = score;
    let exercise = &exercises[question_number - 1];
    let correct = exercise.check(answer);
    if correct {
        current_score += 1;
    }
    send_html(&bot, chat_id, render::gap_verdict(exercise, correct)).await?;

    if question_number >= exercises.len() {
        bot.send_message(
            chat_id,
            format!(
                "Übung beendet! Du hast {} von {} richtig.",
                current_score,
                exercises.len()
            ),
        )
        .await?;
        return show_main_menu(&bot, &dialogue, chat_id).await;
    }

    ask_gap_question(&bot, chat_id, question_number).await?;
    dialogue
        .update(State::GapExercise {
            question_number: question_number + 1,
            score: current_score,
        })
        .await?;
    Ok(())
}
