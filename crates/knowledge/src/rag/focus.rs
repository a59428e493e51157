//! Keyword-derived focus areas and templated action plans.
//!
//! Nothing here calls a model; the same query always yields the same lists.

/// Returned when no topic matches.
pub const GENERAL_FOCUS: &str = "General wellbeing";

const GENERAL_TODAY: &str =
    "Pause for three slow breaths and notice how your body feels right now.";
const GENERAL_WEEK: &str =
    "Check in with yourself at the same time each day and note one word for your mood.";

/// `stems` match any word they begin, or a phrase anywhere when they contain
/// a space. `words` only match whole words.
struct Topic {
    label: &'static str,
    stems: &'static [&'static str],
    words: &'static [&'static str],
    today: &'static str,
    week: &'static str,
}

const TOPICS: &[Topic] = &[
    Topic {
        label: "Sleep patterns",
        stems: &["sleep", "insomnia", "tired", "exhaust", "awake", "nightmare", "restless"],
        words: &["rest", "rested", "resting"],
        today: "Put screens away 30 minutes before bed and keep the room dim and cool.",
        week: "Keep the same wake-up time every day this week, including weekends.",
    },
    Topic {
        label: "Anxiety & worry",
        stems: &["anxi", "worr", "panic", "nervous", "overthink", "fear", "scared"],
        words: &[],
        today: "When worry builds, name five things you can see and four you can hear.",
        week: "Set aside ten minutes of 'worry time' each day to write worries down and then close the notebook.",
    },
    Topic {
        label: "Low mood",
        stems: &["sadness", "hopeless", "empty", "unhappy", "feeling low", "feel low", "feeling down", "feel down"],
        words: &["sad", "down", "low", "cry", "crying", "cried", "cries", "numb", "numbness"],
        today: "Do one small thing you used to enjoy, even for five minutes.",
        week: "Spend some time outside in daylight on at least four days this week.",
    },
    Topic {
        label: "Stress & overwhelm",
        stems: &["stress", "overwhelm", "pressure", "burnout", "burned out", "burnt out", "deadline", "busy", "too much"],
        words: &[],
        today: "Write down everything on your mind, then pick just one item to start.",
        week: "Block one short break into each day and protect it like an appointment.",
    },
    Topic {
        label: "Relationships & connection",
        stems: &["lonel", "alone", "friend", "family", "partner", "relationship", "isolat", "conflict"],
        words: &[],
        today: "Send a short message to one person you feel comfortable with.",
        week: "Plan one conversation or activity with someone you trust this week.",
    },
    Topic {
        label: "Focus & motivation",
        stems: &["focus", "concentrat", "motivat", "procrastinat", "distract", "productiv", "lazy"],
        words: &[],
        today: "Work on one task for 15 minutes with your phone in another room.",
        week: "Each evening, choose the single most important task for the next day.",
    },
    Topic {
        label: "Anger & frustration",
        stems: &["anger", "angry", "frustrat", "irritat", "annoy", "furious", "resent"],
        words: &["rage", "raging", "enraged"],
        today: "When anger rises, step away for a few minutes and breathe out slowly.",
        week: "Notice what tends to come right before you feel frustrated and jot it down.",
    },
    Topic {
        label: "Self-esteem",
        stems: &["worthless", "confiden", "esteem", "failure", "ashamed", "shame", "insecure", "useless"],
        words: &[],
        today: "Write down one thing you handled well today, however small.",
        week: "Keep a short list of moments you were kind to yourself or others.",
    },
];

fn words(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .replace('\u{2019}', "'")
        .split(|c: char| !c.is_alphanumeric() && c != '\'')
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

fn matched_topics(query: &str) -> Vec<&'static Topic> {
    let query_words = words(query);
    let lowered = query_words.join(" ");

    TOPICS
        .iter()
        .filter(|topic| {
            let stem_hit = topic.stems.iter().any(|stem| {
                if stem.contains(' ') {
                    lowered.contains(stem)
                } else {
                    query_words.iter().any(|w| w.starts_with(stem))
                }
            });
            stem_hit || topic.words.iter().any(|word| query_words.iter().any(|w| w == word))
        })
        .collect()
}

/// Topic labels matched by the query, in table order.
pub fn focus_areas(query: &str) -> Vec<String> {
    let labels: Vec<String> = matched_topics(query)
        .iter()
        .map(|t| t.label.to_string())
        .collect();

    if labels.is_empty() {
        vec![GENERAL_FOCUS.to_string()]
    } else {
        labels
    }
}

/// One general step plus one immediate step per matched topic.
pub fn plan_today(focus: &[String]) -> Vec<String> {
    plan(focus, GENERAL_TODAY, |t| t.today)
}

/// One general step plus one multi-day step per matched topic.
pub fn plan_week(focus: &[String]) -> Vec<String> {
    plan(focus, GENERAL_WEEK, |t| t.week)
}

fn plan(focus: &[String], general: &str, step: fn(&Topic) -> &'static str) -> Vec<String> {
    let mut steps = vec![general.to_string()];
    steps.extend(
        TOPICS
            .iter()
            .filter(|t| focus.iter().any(|f| f == t.label))
            .map(|t| step(t).to_string()),
    );
    steps
}
