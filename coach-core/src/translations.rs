//! Static reply templates per language. Placeholders are written `{name}`, `{url}`, `{task}`.

use crate::language::Language;

/// Keys of the reply templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKey {
    ShowPlans,
    NewPlanPrompt,
    PlanLink,
    PlanCreated,
    UpdateOrNew,
    NoPlans,
    ErrorGenerating,
    SamePlan,
    OffTopic,
    PremiumRequired,
    GoalDone,
    GoalReminder,
    RequestFailed,
}

fn swedish(key: MessageKey) -> &'static str {
    match key {
        MessageKey::ShowPlans => "Här är dina planer",
        MessageKey::NewPlanPrompt => "Du har redan ett schema. Vill du uppdatera det eller skapa ett nytt? Svara 'uppdatera' eller 'ny'.",
        MessageKey::PlanLink => "Kopiera denna länk för att se schemat: ",
        MessageKey::PlanCreated => "Här är ditt schema",
        MessageKey::UpdateOrNew => "Menar du {name}? Länk: {url}\nVill du uppdatera den eller skapa en ny? Svara 'uppdatera' eller 'ny'.",
        MessageKey::NoPlans => "Du har inga planer än",
        MessageKey::ErrorGenerating => "Fel vid generering av schema. Försök igen!",
        MessageKey::SamePlan => "Det här schemat är samma som ditt senaste ({name}). Länk: {url}",
        MessageKey::OffTopic => "Jag är här för att hjälpa dig med life coaching, så jag är bäst på ämnen som träning, mindset, karriär, ekonomi och produktivitet. Vad vill du fokusera på?",
        MessageKey::PremiumRequired => "Du behöver ett premiumkonto för att se planer!",
        MessageKey::GoalDone => "Bra jobbat!",
        MessageKey::GoalReminder => "Hur gick det med {task}?",
        MessageKey::RequestFailed => "Något gick fel. Försök igen om en stund.",
    }
}

fn english(key: MessageKey) -> &'static str {
    match key {
        MessageKey::ShowPlans => "Here are your plans",
        MessageKey::NewPlanPrompt => "You already have a plan. Do you want to update it or create a new one? Reply 'update' or 'new'.",
        MessageKey::PlanLink => "Copy this link to see the plan: ",
        MessageKey::PlanCreated => "Here is your plan",
        MessageKey::UpdateOrNew => "Do you mean {name}? Link: {url}\nDo you want to update it or create a new one? Reply 'update' or 'new'.",
        MessageKey::NoPlans => "You have no plans yet",
        MessageKey::ErrorGenerating => "Error generating plan. Please try again!",
        MessageKey::SamePlan => "This plan is the same as your latest ({name}). Link: {url}",
        MessageKey::OffTopic => "I’m here to help with life coaching, so I’m best suited for topics like training, mindset, career, finance, and productivity. What would you like to focus on?",
        MessageKey::PremiumRequired => "You need a premium account to see plans!",
        MessageKey::GoalDone => "Well done!",
        MessageKey::GoalReminder => "How did it go with {task}?",
        MessageKey::RequestFailed => "Sorry, something went wrong. Please try again later.",
    }
}

/// Returns the template for `key` in `lang`.
pub fn translate(lang: Language, key: MessageKey) -> &'static str {
    match lang {
        Language::Sv => swedish(key),
        Language::En => english(key),
    }
}

/// Replaces each `{name}` placeholder with its value. Unknown placeholders are left as-is.
pub fn render(template: &str, values: &[(&str, &str)]) -> String {
    values
        .iter()
        .fold(template.to_string(), |out, (name, value)| {
            out.replace(&format!("{{{}}}", name), value)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_per_language() {
        assert_eq!(translate(Language::Sv, MessageKey::NoPlans), "Du har inga planer än");
        assert_eq!(translate(Language::En, MessageKey::NoPlans), "You have no plans yet");
    }

    #[test]
    fn test_unknown_code_uses_english_templates() {
        let lang = Language::from_code("fr");
        assert_eq!(
            translate(lang, MessageKey::PlanCreated),
            translate(Language::En, MessageKey::PlanCreated)
        );
    }

    #[test]
    fn test_render_replaces_placeholders() {
        let out = render(
            translate(Language::En, MessageKey::SamePlan),
            &[("name", "Training Basplan"), ("url", "http://x/user/1/plan/0")],
        );
        assert_eq!(
            out,
            "This plan is the same as your latest (Training Basplan). Link: http://x/user/1/plan/0"
        );
    }

    #[test]
    fn test_render_leaves_unknown_placeholders() {
        assert_eq!(render("Hi {name} {other}", &[("name", "Ana")]), "Hi Ana {other}");
    }
}
