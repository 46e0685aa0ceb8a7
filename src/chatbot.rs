//! Keyword-driven answers to common menstrual-health questions.

use serde::Serialize;

use crate::directory;
use crate::models::Gynecologist;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Urgent,
}

#[derive(Debug)]
pub struct KnowledgeEntry {
    pub keywords: &'static [&'static str],
    pub response: &'static str,
    pub category: &'static str,
    pub severity: Severity,
}

pub const DOCTOR_INTENT: [&str; 4] = ["doctor", "gynecologist", "gynaecologist", "find"];
pub const DOCTOR_RESULTS: usize = 5;

pub const FALLBACK_RESPONSE: &str = "I understand you have a question. While I can provide general information about menstrual health, for specific medical concerns, I recommend consulting with a healthcare provider. You can ask me about periods, symptoms, hygiene, or finding a gynecologist!";

pub static KNOWLEDGE_BASE: &[KnowledgeEntry] = &[
    KnowledgeEntry {
        keywords: &["what is period", "what is menstruation", "explain period", "periods mean", "menstruation", "menstrual", "monthly cycle"],
        response: "A period (menstruation) is the monthly shedding of the uterine lining. It usually lasts 3-7 days and comes every 21-35 days. It is a normal part of reproductive health that starts at puberty.",
        category: "basics",
        severity: Severity::Info,
    },
    KnowledgeEntry {
        keywords: &["normal cycle", "cycle length", "how long cycle", "average cycle", "regular cycle", "irregular cycle"],
        response: "A typical cycle runs 21 to 35 days, with 28 as the average. Count from the first day of one period to the first day of the next. Some month-to-month variation is normal.",
        category: "cycle",
        severity: Severity::Info,
    },
    KnowledgeEntry {
        keywords: &["first period", "menarche", "puberty"],
        response: "Most people get their first period between ages 10 and 15. Early cycles are often irregular for the first year or two while the body adjusts.",
        category: "basics",
        severity: Severity::Info,
    },
    KnowledgeEntry {
        keywords: &["cramps", "period pain", "painful period", "dysmenorrhea", "stomach pain", "lower back pain"],
        response: "Cramps come from uterine contractions and are very common. A heating pad, gentle exercise, staying hydrated and over-the-counter pain relief usually help. See a doctor if the pain disrupts daily life.",
        category: "symptoms",
        severity: Severity::Info,
    },
    KnowledgeEntry {
        keywords: &["heavy bleeding", "heavy flow", "too much blood", "menorrhagia", "blood clots", "soaking"],
        response: "Soaking a pad or tampon every hour, bleeding longer than 7 days or passing large clots counts as heavy bleeding. If it happens regularly, please see a gynecologist; fibroids or hormonal imbalances can cause it.",
        category: "symptoms",
        severity: Severity::Warning,
    },
    KnowledgeEntry {
        keywords: &["pms", "premenstrual", "mood swings", "irritable", "anxiety"],
        response: "PMS affects most menstruating people at some point. Regular exercise, less caffeine and salt, enough sleep and stress relief all help. Symptoms usually show up one to two weeks before a period.",
        category: "symptoms",
        severity: Severity::Info,
    },
    KnowledgeEntry {
        keywords: &["headache", "migraine"],
        response: "Menstrual migraines are linked to falling estrogen. Hydration, regular sleep and a symptom diary help; see a doctor if they are severe.",
        category: "symptoms",
        severity: Severity::Info,
    },
    KnowledgeEntry {
        keywords: &["bloating", "bloated", "water retention"],
        response: "Bloating comes from hormonal water retention. Cut back on salt, drink more water and eat potassium-rich foods. It normally eases once the period ends.",
        category: "symptoms",
        severity: Severity::Info,
    },
    KnowledgeEntry {
        keywords: &["fatigue", "tired", "exhausted", "no energy"],
        response: "Period fatigue is real. Sleep 7-9 hours, eat iron-rich foods and stay hydrated. Severe tiredness can point to anemia, so mention it to a doctor.",
        category: "symptoms",
        severity: Severity::Info,
    },
    KnowledgeEntry {
        keywords: &["discharge", "white discharge", "brown discharge"],
        response: "Discharge changes across the cycle and is usually normal. See a doctor for green, grey or yellow discharge, a strong fishy odour, or itching and burning.",
        category: "hygiene",
        severity: Severity::Info,
    },
    KnowledgeEntry {
        keywords: &["hygiene", "how to clean", "washing", "intimate wash"],
        response: "Wash the outside with warm water and mild unscented soap, wipe front to back and change products every 4-6 hours. Do not douche.",
        category: "hygiene",
        severity: Severity::Info,
    },
    KnowledgeEntry {
        keywords: &["pad", "tampon", "menstrual cup", "period products", "sanitary"],
        response: "Pads, tampons, menstrual cups and period underwear all work; choose what is comfortable. Change pads every 4-6 hours, tampons every 4-8 hours and cups every 8-12 hours.",
        category: "products",
        severity: Severity::Info,
    },
    KnowledgeEntry {
        keywords: &["toxic shock", "tss"],
        response: "Toxic shock syndrome is rare but serious. Never leave a tampon in longer than 8 hours. A sudden fever, sunburn-like rash, dizziness or vomiting needs emergency care: remove the tampon and go to a hospital.",
        category: "hygiene",
        severity: Severity::Urgent,
    },
    KnowledgeEntry {
        keywords: &["pcos", "polycystic"],
        response: "PCOS affects about 1 in 10 women and can cause irregular periods, acne and excess hair growth. Diet, exercise and medication help manage it; a gynecologist can confirm the diagnosis.",
        category: "conditions",
        severity: Severity::Warning,
    },
    KnowledgeEntry {
        keywords: &["endometriosis", "severe pain", "extreme pain"],
        response: "Endometriosis is tissue like the uterine lining growing outside the uterus. It can cause severe cramps and heavy periods. Debilitating pain deserves a visit to a gynecologist.",
        category: "conditions",
        severity: Severity::Warning,
    },
    KnowledgeEntry {
        keywords: &["fertility", "fertile", "ovulation", "ovulate", "get pregnant", "conceive"],
        response: "Ovulation usually happens about 14 days before the next period. The fertile window covers the 5 days before ovulation and the day after it.",
        category: "fertility",
        severity: Severity::Info,
    },
    KnowledgeEntry {
        keywords: &["late period", "missed period", "delayed period", "period late", "no period"],
        response: "Stress, weight changes, intense exercise, PCOS or thyroid issues can all delay a period. If you are sexually active, take a pregnancy test. See a doctor if cycles stay irregular for three months or more.",
        category: "cycle",
        severity: Severity::Info,
    },
];

/// Scores an entry by the length of its longest keyword found in `message`.
fn score(entry: &KnowledgeEntry, message: &str) -> usize {
    entry
        .keywords
        .iter()
        .filter(|k| message.contains(&k.to_lowercase()))
        .map(|k| k.len())
        .max()
        .unwrap_or(0)
}

/// Best-scoring entry, earliest entry on ties.
pub fn find_best_response(message: &str) -> Option<&'static KnowledgeEntry> {
    let lower = message.to_lowercase();
    let mut best: Option<(&'static KnowledgeEntry, usize)> = None;
    for entry in KNOWLEDGE_BASE {
        let s = score(entry, &lower);
        if s > 0 && best.map_or(true, |(_, top)| s > top) {
            best = Some((entry, s));
        }
    }
    best.map(|(entry, _)| entry)
}

pub fn wants_doctor(message: &str) -> bool {
    let lower = message.to_lowercase();
    DOCTOR_INTENT.iter().any(|k| lower.contains(k))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BotReply {
    pub role: &'static str,
    pub content: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doctors: Option<Vec<&'static Gynecologist>>,
}

impl BotReply {
    /// What gets written to chat history for this reply.
    pub fn history_text(&self) -> String {
        match self.kind {
            Some("gynecologist_search") => "Searching for gynecologists in Jaipur...".to_string(),
            _ => self.content.clone(),
        }
    }
}

pub fn reply(message: &str) -> BotReply {
    if wants_doctor(message) {
        let doctors = directory::top_rated(DOCTOR_RESULTS);
        return BotReply {
            role: "assistant",
            content: format!(
                "I found {} top-rated gynecologists in Jaipur for you! Here are the best options sorted by rating:",
                directory::GYNECOLOGISTS.len()
            ),
            kind: Some("gynecologist_search"),
            category: Some("doctor"),
            severity: None,
            doctors: Some(doctors),
        };
    }

    match find_best_response(message) {
        Some(entry) => BotReply {
            role: "assistant",
            content: entry.response.to_string(),
            kind: None,
            category: Some(entry.category),
            severity: Some(entry.severity),
            doctors: None,
        },
        None => BotReply {
            role: "assistant",
            content: FALLBACK_RESPONSE.to_string(),
            kind: None,
            category: None,
            severity: None,
            doctors: None,
        },
    }
}
