//! Integration tests for [`coach_core::CoachRouter`] with a mocked LLM.

use async_trait::async_trait;
use chrono::Duration;
use coach_core::{
    CoachRouter, ConversationState, FocusArea, InMemoryProfileStore, Plan, ProfileStore,
    RouterConfig, Tone,
};
use llm_client::LlmClient;
use mockall::mock;
use prompt::ChatMessage;
use std::sync::Arc;

mock! {
    pub Llm {}

    #[async_trait]
    impl LlmClient for Llm {
        async fn get_llm_response_with_messages(
            &self,
            messages: Vec<ChatMessage>,
        ) -> anyhow::Result<String>;
    }
}

const USER: &str = "42";

const SCHEDULE: &str = "Mån: Running 30 min\nTis: Strength 45 min\nOns: Rest\nTor: Yoga 30 min\nFre: Cycling 1 hour\nLör: Swimming 45 min\nSön: Rest";
const OTHER_SCHEDULE: &str = "Mån: Rest\nTis: Yoga 20 min\nOns: Rest\nTor: Yoga 20 min\nFre: Rest\nLör: Hike 2 hours\nSön: Rest";

fn router(store: Arc<InMemoryProfileStore>, llm: MockLlm) -> CoachRouter {
    CoachRouter::new(store, Arc::new(llm), RouterConfig::default())
}

/// A store holding one onboarded (Active) profile for [`USER`].
async fn active_store(premium: bool) -> Arc<InMemoryProfileStore> {
    let store = if premium {
        InMemoryProfileStore::with_premium_users([USER])
    } else {
        InMemoryProfileStore::new()
    };
    let mut profile = store.get_or_create(USER).await.unwrap();
    profile.state = ConversationState::Active;
    profile.tone = Some(Tone::MotivatingFriend);
    profile.focus_area = Some(FocusArea::Training);
    store.update(USER, profile).await.unwrap();
    Arc::new(store)
}

async fn add_plan(store: &InMemoryProfileStore, name: &str, content: &str) {
    let mut profile = store.get(USER).await.unwrap().unwrap();
    profile.plans.push(Plan {
        name: name.to_string(),
        content: content.to_string(),
    });
    store.update(USER, profile).await.unwrap();
}

fn llm_replying(reply: &'static str, times: usize) -> MockLlm {
    let mut llm = MockLlm::new();
    llm.expect_get_llm_response_with_messages()
        .times(times)
        .returning(move |_| Ok(reply.to_string()));
    llm
}

fn llm_never() -> MockLlm {
    let mut llm = MockLlm::new();
    llm.expect_get_llm_response_with_messages().never();
    llm
}

/// **Test: onboarding moves New → ToneSet → Active and the focus message is answered as chat.**
#[tokio::test]
async fn onboarding_transitions_to_active() {
    let store = Arc::new(InMemoryProfileStore::new());
    let router = router(store.clone(), llm_replying("Nice to meet you!", 3));

    router.respond(USER, "hello").await.unwrap();
    let profile = store.get(USER).await.unwrap().unwrap();
    assert_eq!(profile.state, ConversationState::New);

    router.respond(USER, "1").await.unwrap();
    let profile = store.get(USER).await.unwrap().unwrap();
    assert_eq!(profile.state, ConversationState::ToneSet);
    assert_eq!(profile.tone, Some(Tone::MotivatingFriend));

    router.respond(USER, "training").await.unwrap();
    let profile = store.get(USER).await.unwrap().unwrap();
    assert_eq!(profile.state, ConversationState::Active);
    assert_eq!(profile.focus_area, Some(FocusArea::Training));
}

/// **Test: an unknown focus answer keeps the user in ToneSet.**
#[tokio::test]
async fn unknown_focus_keeps_tone_set() {
    let store = Arc::new(InMemoryProfileStore::new());
    let router = router(store.clone(), llm_replying("Which area?", 2));

    router.respond(USER, "2").await.unwrap();
    router.respond(USER, "I like cooking").await.unwrap();

    let profile = store.get(USER).await.unwrap().unwrap();
    assert_eq!(profile.state, ConversationState::ToneSet);
    assert_eq!(profile.tone, Some(Tone::StrictMentor));
    assert!(profile.focus_area.is_none());
}

/// **Test: the onboarding prompt is sent as a single user message embedding the message.**
#[tokio::test]
async fn onboarding_prompt_is_sent_to_llm() {
    let store = Arc::new(InMemoryProfileStore::new());
    let mut llm = MockLlm::new();
    llm.expect_get_llm_response_with_messages()
        .withf(|messages| {
            messages.len() == 1
                && messages[0].content.contains("asking their name")
                && messages[0].content.ends_with("User said: hello")
        })
        .times(1)
        .returning(|_| Ok("What's your name?".to_string()));
    let router = router(store, llm);

    assert_eq!(router.respond(USER, "hello").await.unwrap(), "What's your name?");
}

/// **Test: every exchange is appended to the history.**
#[tokio::test]
async fn exchange_is_recorded_in_history() {
    let store = Arc::new(InMemoryProfileStore::new());
    let router = router(store.clone(), llm_replying("Hi there", 1));

    router.respond(USER, "hello").await.unwrap();
    let profile = store.get(USER).await.unwrap().unwrap();
    assert_eq!(profile.history, "\nUser: hello\nCoach: Hi there");
}

/// **Test: "show plans" wins over the plan keyword it contains and never calls the LLM.**
#[tokio::test]
async fn show_plans_takes_precedence_over_plan_request() {
    let store = active_store(true).await;
    let router = router(store.clone(), llm_never());

    assert_eq!(router.respond(USER, "show plans").await.unwrap(), "You have no plans yet");
    assert_eq!(router.respond(USER, "tack, visa planer").await.unwrap(), "Du har inga planer än");

    add_plan(&store, "Training - Running", SCHEDULE).await;
    let reply = router.respond(USER, "show plans").await.unwrap();
    assert_eq!(
        reply,
        "Here are your plans\nTraining - Running\nCopy this link to see the plan: http://localhost:5000/user/42/plan/0\n"
    );
}

/// **Test: a premium plan request stores a named plan and links to index 0.**
#[tokio::test]
async fn plan_request_creates_first_plan() {
    let store = active_store(true).await;
    let reply_text = "Sure! Here it is:\nMån: Running 30 min\nTis: Strength 45 min\nOns: Rest\nTor: Yoga 30 min\nFre: Cycling 1 hour\nLör: Swimming 45 min\nSön: Rest\nGood luck!";
    let router = router(store.clone(), llm_replying(reply_text, 1));

    let reply = router.respond(USER, "give me a plan").await.unwrap();
    assert_eq!(
        reply,
        format!(
            "{}\nHere is your plan\nCopy this link to see the plan: http://localhost:5000/user/42/plan/0",
            SCHEDULE
        )
    );

    let profile = store.get(USER).await.unwrap().unwrap();
    assert_eq!(profile.plans.len(), 1);
    assert_eq!(profile.plans[0].content, SCHEDULE);
    assert_eq!(
        profile.plans[0].name,
        "Training - Running 30 min och strength 45 min"
    );
    assert!(profile.last_schema_time.is_some());
}

/// **Test: a second request inside the cooldown returns the latest link without an LLM call.**
#[tokio::test]
async fn repeated_plan_request_within_cooldown_is_deduplicated() {
    let store = active_store(true).await;
    let router = router(store.clone(), llm_replying(SCHEDULE, 1));

    router.respond(USER, "give me a plan").await.unwrap();
    let reply = router.respond(USER, "give me another plan").await.unwrap();

    assert!(reply.starts_with("You already have a plan."));
    assert!(reply.ends_with("http://localhost:5000/user/42/plan/0"));
    let profile = store.get(USER).await.unwrap().unwrap();
    assert_eq!(profile.plans.len(), 1);
    assert_eq!(profile.last_plan_reference, Some(0));
}

/// **Test: with no cooldown a second request generates and appends a new plan.**
#[tokio::test]
async fn plan_request_after_cooldown_generates_again() {
    let store = active_store(true).await;
    let mut llm = MockLlm::new();
    let mut replies = vec![OTHER_SCHEDULE, SCHEDULE];
    llm.expect_get_llm_response_with_messages()
        .times(2)
        .returning(move |_| Ok(replies.pop().unwrap_or_default().to_string()));
    let config = RouterConfig {
        plan_cooldown: Duration::zero(),
        ..RouterConfig::default()
    };
    let router = CoachRouter::new(store.clone(), Arc::new(llm), config);

    router.respond(USER, "create a plan").await.unwrap();
    let reply = router.respond(USER, "create a plan").await.unwrap();

    assert!(reply.ends_with("/user/42/plan/1"));
    assert_eq!(store.get(USER).await.unwrap().unwrap().plans.len(), 2);
}

/// **Test: a generated schedule equal to the latest plan is reported as the same plan.**
#[tokio::test]
async fn identical_schedule_reports_same_plan() {
    let store = active_store(true).await;
    add_plan(&store, "Training - Running", SCHEDULE).await;
    let router = router(store.clone(), llm_replying(SCHEDULE, 1));

    let reply = router.respond(USER, "create a new schedule").await.unwrap();
    assert_eq!(
        reply,
        "This plan is the same as your latest (Training - Running). Link: http://localhost:5000/user/42/plan/0"
    );
    let profile = store.get(USER).await.unwrap().unwrap();
    assert_eq!(profile.plans.len(), 1);
    assert!(profile.last_schema_time.is_some());
}

/// **Test: a reply without a schedule yields the generation error and stores nothing.**
#[tokio::test]
async fn reply_without_schedule_is_an_error_message() {
    let store = active_store(true).await;
    let router = router(store.clone(), llm_replying("I cannot do that right now.", 1));

    let reply = router.respond(USER, "give me a plan").await.unwrap();
    assert_eq!(reply, "Error generating plan. Please try again!");
    assert!(store.get(USER).await.unwrap().unwrap().plans.is_empty());
}

/// **Test: non-premium users get the upsell for plan requests, without an LLM call.**
#[tokio::test]
async fn plan_request_requires_premium() {
    let store = active_store(false).await;
    let router = router(store, llm_never());

    assert_eq!(
        router.respond(USER, "give me a plan").await.unwrap(),
        "You need a premium account to see plans!"
    );
    assert_eq!(
        router.respond(USER, "skapa ett schema").await.unwrap(),
        "Du behöver ett premiumkonto för att se planer!"
    );
}

/// **Test: naming an existing plan asks update-or-new, then "update" regenerates from it.**
#[tokio::test]
async fn plan_reference_then_update() {
    let store = active_store(true).await;
    add_plan(
        &store,
        "Training - Running 30 min och strength 45 min",
        SCHEDULE,
    )
    .await;

    let mut llm = MockLlm::new();
    llm.expect_get_llm_response_with_messages()
        .withf(|messages| {
            messages[0]
                .content
                .contains("Update this plan (Training - Running 30 min och strength 45 min)")
        })
        .times(1)
        .returning(|_| Ok(OTHER_SCHEDULE.to_string()));
    let router = router(store.clone(), llm);

    let reply = router.respond(USER, "update my running plan").await.unwrap();
    assert!(reply.starts_with(
        "Do you mean Training - Running 30 min och strength 45 min? Link: http://localhost:5000/user/42/plan/0"
    ));
    assert_eq!(
        store.get(USER).await.unwrap().unwrap().last_plan_reference,
        Some(0)
    );

    let reply = router.respond(USER, "update").await.unwrap();
    assert!(reply.starts_with(OTHER_SCHEDULE));
    assert!(reply.ends_with("/user/42/plan/1"));
    let profile = store.get(USER).await.unwrap().unwrap();
    assert_eq!(profile.plans.len(), 2);
    assert_eq!(profile.plans[0].content, SCHEDULE);
}

/// **Test: the focus keyword alone does not pick a plan; a name word picks the latest match.**
#[tokio::test]
async fn plan_reference_ignores_focus_and_prefers_latest() {
    let store = active_store(true).await;
    add_plan(&store, "Training - Running 30 min och rest", SCHEDULE).await;
    add_plan(&store, "Training - Running 20 min och yoga 20 min", OTHER_SCHEDULE).await;
    let router = router(store.clone(), llm_never());

    let reply = router.respond(USER, "update my running plan").await.unwrap();
    assert!(reply.starts_with(
        "Do you mean Training - Running 20 min och yoga 20 min? Link: http://localhost:5000/user/42/plan/1"
    ));
    assert_eq!(
        store.get(USER).await.unwrap().unwrap().last_plan_reference,
        Some(1)
    );
}

/// **Test: "create a training plan" generates a plan instead of referencing an old one.**
#[tokio::test]
async fn focus_keyword_request_generates_new_plan() {
    let store = active_store(true).await;
    add_plan(&store, "Training - Rest och yoga 20 min", OTHER_SCHEDULE).await;
    let router = router(store.clone(), llm_replying(SCHEDULE, 1));

    let reply = router.respond(USER, "create a training plan").await.unwrap();
    assert!(reply.ends_with("/user/42/plan/1"));
    assert_eq!(store.get(USER).await.unwrap().unwrap().plans.len(), 2);
}

/// **Test: an explicit "new" after the cooldown reply generates a second plan.**
#[tokio::test]
async fn explicit_new_bypasses_cooldown() {
    let store = active_store(true).await;
    let mut llm = MockLlm::new();
    let mut replies = vec![OTHER_SCHEDULE, SCHEDULE];
    llm.expect_get_llm_response_with_messages()
        .times(2)
        .returning(move |_| Ok(replies.pop().unwrap_or_default().to_string()));
    let router = router(store.clone(), llm);

    router.respond(USER, "give me a plan").await.unwrap();
    let cooldown = router.respond(USER, "give me a plan").await.unwrap();
    assert!(cooldown.starts_with("You already have a plan."));
    assert!(cooldown.ends_with("/user/42/plan/0"));
    assert_eq!(store.get(USER).await.unwrap().unwrap().plans.len(), 1);

    let reply = router.respond(USER, "new").await.unwrap();
    assert!(reply.starts_with(OTHER_SCHEDULE));
    assert!(reply.ends_with("/user/42/plan/1"));
    let profile = store.get(USER).await.unwrap().unwrap();
    assert_eq!(profile.plans.len(), 2);
    assert_eq!(profile.plans[1].content, OTHER_SCHEDULE);
    assert_eq!(profile.last_plan_reference, Some(1));
}

/// **Test: a bare "new" with no plan reference pending is ordinary chat.**
#[tokio::test]
async fn bare_choice_without_reference_is_general_chat() {
    let store = active_store(true).await;
    let router = router(store.clone(), llm_replying("What is new with you?", 1));

    assert_eq!(router.respond(USER, "new").await.unwrap(), "What is new with you?");
    assert!(store.get(USER).await.unwrap().unwrap().plans.is_empty());
}

/// **Test: off-topic messages get the canned reply without an LLM call.**
#[tokio::test]
async fn off_topic_short_circuits() {
    let store = active_store(true).await;
    let router = router(store, llm_never());

    let reply = router.respond(USER, "what about the weather").await.unwrap();
    assert!(reply.starts_with("I’m here to help with life coaching"));
    let reply = router.respond(USER, "tack, men vad tycker du om politik").await.unwrap();
    assert!(reply.starts_with("Jag är här för att hjälpa dig"));
}

/// **Test: a time cue creates a goal; repeating it with "i am done" completes it.**
#[tokio::test]
async fn goals_are_created_and_completed() {
    let store = active_store(true).await;
    let router = router(store.clone(), llm_replying("Sounds good", 2));

    router.respond(USER, "run at 7").await.unwrap();
    let profile = store.get(USER).await.unwrap().unwrap();
    assert_eq!(profile.goals.len(), 1);
    assert_eq!(profile.goals[0].task, "run at 7");
    assert_eq!(profile.goals[0].time, "07:00");
    assert!(!profile.goals[0].done);

    let reply = router.respond(USER, "I am done: run at 7").await.unwrap();
    assert_eq!(reply, "Sounds good\nWell done!");
    let profile = store.get(USER).await.unwrap().unwrap();
    assert_eq!(profile.goals.len(), 1);
    assert!(profile.goals[0].done);
}

/// **Test: a time cue in an answer to the focus question still creates a goal.**
#[tokio::test]
async fn goal_is_tracked_while_choosing_focus() {
    let store = InMemoryProfileStore::with_premium_users([USER]);
    let mut profile = store.get_or_create(USER).await.unwrap();
    profile.state = ConversationState::ToneSet;
    profile.tone = Some(Tone::RelaxedGuide);
    store.update(USER, profile).await.unwrap();
    let store = Arc::new(store);
    let router = router(store.clone(), llm_replying("Which area do you want to focus on?", 1));

    router.respond(USER, "run at 7").await.unwrap();

    let profile = store.get(USER).await.unwrap().unwrap();
    assert_eq!(profile.state, ConversationState::ToneSet);
    assert_eq!(profile.goals.len(), 1);
    assert_eq!(profile.goals[0].time, "07:00");
}

/// **Test: goals are not tracked for non-premium users.**
#[tokio::test]
async fn goals_require_premium() {
    let store = active_store(false).await;
    let router = router(store.clone(), llm_replying("Sounds good", 1));

    router.respond(USER, "train at 18:00").await.unwrap();
    assert!(store.get(USER).await.unwrap().unwrap().goals.is_empty());
}

/// **Test: an LLM failure is answered with the apology template and still recorded.**
#[tokio::test]
async fn llm_failure_degrades_to_template() {
    let store = active_store(true).await;
    let mut llm = MockLlm::new();
    llm.expect_get_llm_response_with_messages()
        .times(1)
        .returning(|_| Err(anyhow::anyhow!("connection refused")));
    let router = router(store.clone(), llm);

    let reply = router.respond(USER, "train at 18:00").await.unwrap();
    assert_eq!(reply, "Sorry, something went wrong. Please try again later.");
    let profile = store.get(USER).await.unwrap().unwrap();
    assert!(profile.goals.is_empty());
    assert!(profile.history.ends_with(&reply));
}
