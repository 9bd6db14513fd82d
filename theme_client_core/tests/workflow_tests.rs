//! Workflow state machine tests against mocked collaborators

use std::sync::Arc;
use theme_client_core::{
    CancelReason, ConfigError, Error, PullSource, SafetyViolation, Theme, ThemeWorkflow,
    WorkflowEvent, WorkflowOptions, WorkflowOutcome,
};
use theme_test_utils::{
    Answer, Invocation, MockThemeCommands, ProjectDir, RecordingObserver, ScriptedPrompter,
    ServerBehavior, ThemeSetBuilder, store_themes,
};

struct Harness {
    commands: Arc<MockThemeCommands>,
    prompter: Arc<ScriptedPrompter>,
    observer: Arc<RecordingObserver>,
    project: ProjectDir,
}

impl Harness {
    fn new(commands: MockThemeCommands, answers: Vec<Answer>) -> Self {
        Self::in_project(
            ProjectDir::with_credentials("example.myshopify.com", "shptka_test"),
            commands,
            answers,
        )
    }

    fn in_project(project: ProjectDir, commands: MockThemeCommands, answers: Vec<Answer>) -> Self {
        Self {
            commands: Arc::new(commands),
            prompter: Arc::new(ScriptedPrompter::new(answers)),
            observer: Arc::new(RecordingObserver::new()),
            project,
        }
    }

    fn workflow(&self, options: WorkflowOptions) -> ThemeWorkflow {
        ThemeWorkflow::new(
            self.commands.clone(),
            self.prompter.clone(),
            self.observer.clone(),
            self.project.path(),
        )
        .with_options(options)
    }

    async fn dev(&self) -> theme_client_core::Result<WorkflowOutcome> {
        self.workflow(WorkflowOptions::dev()).run().await
    }

    async fn push(&self) -> theme_client_core::Result<WorkflowOutcome> {
        self.workflow(WorkflowOptions::push()).run().await
    }
}

fn typical_store() -> MockThemeCommands {
    MockThemeCommands::new().with_themes(store_themes())
}

#[tokio::test]
async fn test_dev_pulls_from_live_then_serves_selected_theme() {
    let harness = Harness::new(
        typical_store(),
        vec![
            Answer::SelectMatching("New".to_string()),
            Answer::Confirm(true),
            Answer::Select(0),
        ],
    );

    let outcome = harness.dev().await.unwrap();

    assert_eq!(outcome, WorkflowOutcome::ServerStopped { interrupted: true });
    assert_eq!(
        harness.commands.calls(),
        vec![
            Invocation::ListThemes,
            Invocation::PullContent(PullSource::Live),
            Invocation::Serve(5),
        ]
    );
    assert_eq!(harness.prompter.remaining(), 0);
}

#[tokio::test]
async fn test_menu_excludes_live_and_lists_newest_first() {
    let harness = Harness::new(typical_store(), vec![Answer::Cancel]);

    harness.dev().await.unwrap();

    let asked = harness.prompter.asked();
    assert_eq!(asked.len(), 1);
    assert_eq!(asked[0].prompt, "Select a theme to develop");
    assert_eq!(asked[0].items, vec!["New (ID: 5)", "Old (ID: 3)"]);
}

#[tokio::test]
async fn test_live_theme_is_reported_before_selection() {
    let harness = Harness::new(typical_store(), vec![Answer::Cancel]);

    harness.dev().await.unwrap();

    let events = harness.observer.events();
    assert!(events.contains(&WorkflowEvent::LiveThemeIdentified {
        theme: Theme::new(1, "Live", "live"),
    }));
    assert!(events.contains(&WorkflowEvent::ThemesFetched { count: 3 }));
}

#[tokio::test]
async fn test_sync_from_selected_theme() {
    let harness = Harness::new(
        typical_store(),
        vec![Answer::Select(1), Answer::Confirm(true), Answer::Select(1)],
    );

    harness.dev().await.unwrap();

    assert_eq!(
        harness.commands.side_effects(),
        vec![
            Invocation::PullContent(PullSource::Theme(3)),
            Invocation::Serve(3),
        ]
    );
}

#[tokio::test]
async fn test_skip_sync_goes_straight_to_server() {
    let harness = Harness::new(
        typical_store(),
        vec![Answer::Select(0), Answer::Confirm(true), Answer::Select(2)],
    );

    harness.dev().await.unwrap();

    assert_eq!(harness.commands.side_effects(), vec![Invocation::Serve(5)]);
    assert!(
        harness
            .observer
            .any(|e| matches!(e, WorkflowEvent::SyncSkipped))
    );
}

#[tokio::test]
async fn test_sync_prompt_defaults_to_live() {
    let harness = Harness::new(
        typical_store(),
        vec![Answer::Select(0), Answer::Default, Answer::Default],
    );

    harness.dev().await.unwrap();

    assert_eq!(
        harness.commands.side_effects(),
        vec![Invocation::PullContent(PullSource::Live), Invocation::Serve(5)]
    );

    let asked = harness.prompter.asked();
    assert_eq!(asked[2].prompt, "How would you like to sync content?");
    assert_eq!(
        asked[2].items,
        vec![
            "Pull from live theme (Live)",
            "Pull from selected theme (New)",
            "Skip pull (use local content)",
        ]
    );
}

#[tokio::test]
async fn test_config_missing_stops_before_any_call() {
    let harness = Harness::in_project(ProjectDir::empty(), typical_store(), vec![]);

    let error = harness.dev().await.unwrap_err();

    assert!(matches!(error, Error::Config(ConfigError::NotFound { .. })));
    assert!(error.to_string().contains("shopify.theme.toml not found"));
    assert!(harness.commands.calls().is_empty());
}

#[tokio::test]
async fn test_incomplete_config_stops_before_any_call() {
    let project = ProjectDir::with_content(
        "[environments.development]\nstore = \"example.myshopify.com\"\n",
    );
    let harness = Harness::in_project(project, typical_store(), vec![]);

    let error = harness.dev().await.unwrap_err();

    assert!(matches!(
        error,
        Error::Config(ConfigError::Incomplete {
            missing: "password",
            ..
        })
    ));
    assert!(harness.commands.calls().is_empty());
}

#[tokio::test]
async fn test_fetch_failure_is_fatal() {
    let harness = Harness::new(
        MockThemeCommands::new().with_list_failure("Invalid API key"),
        vec![],
    );

    let error = harness.dev().await.unwrap_err();

    assert!(matches!(error, Error::Fetch(_)));
    assert!(error.to_string().contains("Invalid API key"));
    assert_eq!(harness.commands.calls(), vec![Invocation::ListThemes]);
    assert!(harness.prompter.asked().is_empty());
}

#[tokio::test]
async fn test_no_live_theme_is_fatal() {
    let themes = ThemeSetBuilder::new()
        .unpublished(5, "New")
        .development(3, "Old")
        .build();
    let harness = Harness::new(MockThemeCommands::new().with_themes(themes), vec![]);

    let error = harness.dev().await.unwrap_err();

    assert!(matches!(error, Error::NoLiveTheme { found: 0 }));
    assert!(harness.prompter.asked().is_empty());
}

#[tokio::test]
async fn test_two_live_themes_are_fatal() {
    let themes = ThemeSetBuilder::new()
        .live(1, "Live")
        .live(2, "Also Live")
        .development(3, "Old")
        .build();
    let harness = Harness::new(MockThemeCommands::new().with_themes(themes), vec![]);

    let error = harness.dev().await.unwrap_err();

    assert!(matches!(error, Error::NoLiveTheme { found: 2 }));
    assert_eq!(harness.commands.side_effects(), vec![]);
}

#[tokio::test]
async fn test_only_live_theme_means_no_eligible_themes() {
    let themes = ThemeSetBuilder::new().live(1, "Live").build();
    let harness = Harness::new(MockThemeCommands::new().with_themes(themes), vec![]);

    let error = harness.dev().await.unwrap_err();

    assert!(matches!(error, Error::NoEligibleThemes));
    assert!(harness.prompter.asked().is_empty());
    assert_eq!(harness.commands.calls(), vec![Invocation::ListThemes]);
}

#[tokio::test]
async fn test_candidate_sharing_live_id_is_blocked_before_side_effects() {
    // A non-live entry reusing the live id can only come from a broken
    // listing, but the gate must still catch it.
    let themes = ThemeSetBuilder::new()
        .live(1, "Live")
        .unpublished(1, "Shadow")
        .build();
    let harness = Harness::new(
        MockThemeCommands::new().with_themes(themes),
        vec![Answer::Select(0), Answer::Confirm(true), Answer::Select(0)],
    );

    let error = harness.dev().await.unwrap_err();

    assert!(matches!(
        error,
        Error::Safety(SafetyViolation::SameIdAsLive { id: 1 })
    ));
    assert!(error.to_string().starts_with("BLOCKED"));
    assert!(harness.commands.side_effects().is_empty());
    assert_eq!(harness.prompter.asked().len(), 1);
    assert!(
        !harness
            .observer
            .any(|e| matches!(e, WorkflowEvent::SafetyPassed { .. }))
    );
}

#[tokio::test]
async fn test_safety_check_is_reported() {
    let harness = Harness::new(
        typical_store(),
        vec![Answer::Select(0), Answer::Confirm(false)],
    );

    harness.dev().await.unwrap();

    let events = harness.observer.events();
    assert!(events.contains(&WorkflowEvent::SafetyCheck {
        candidate: Theme::new(5, "New", "unpublished"),
        live: Theme::new(1, "Live", "live"),
    }));
    assert!(events.contains(&WorkflowEvent::SafetyPassed {
        candidate: Theme::new(5, "New", "unpublished"),
    }));
}

#[tokio::test]
async fn test_sync_failure_still_starts_server() {
    let harness = Harness::new(
        typical_store().with_pull_failure("Network unreachable"),
        vec![Answer::Select(0), Answer::Confirm(true), Answer::Select(0)],
    );

    let outcome = harness.dev().await.unwrap();

    assert_eq!(outcome, WorkflowOutcome::ServerStopped { interrupted: true });
    assert_eq!(
        harness.commands.side_effects(),
        vec![Invocation::PullContent(PullSource::Live), Invocation::Serve(5)]
    );
    assert!(
        harness
            .observer
            .any(|e| matches!(e, WorkflowEvent::SyncFailed { reason } if reason.contains("Network unreachable")))
    );
}

#[tokio::test]
async fn test_interrupted_server_is_not_an_error() {
    let harness = Harness::new(
        typical_store().with_server(ServerBehavior::Interrupt),
        vec![Answer::Select(0), Answer::Confirm(true), Answer::Select(2)],
    );

    let outcome = harness.dev().await.unwrap();

    assert_eq!(outcome, WorkflowOutcome::ServerStopped { interrupted: true });
    assert_eq!(
        harness.observer.events().last(),
        Some(&WorkflowEvent::ServerStopped)
    );
}

#[tokio::test]
async fn test_server_that_exits_normally() {
    let harness = Harness::new(
        typical_store().with_server(ServerBehavior::Finish),
        vec![Answer::Select(0), Answer::Confirm(true), Answer::Select(2)],
    );

    let outcome = harness.dev().await.unwrap();

    assert_eq!(
        outcome,
        WorkflowOutcome::ServerStopped { interrupted: false }
    );
}

#[tokio::test]
async fn test_server_failure_is_fatal() {
    let harness = Harness::new(
        typical_store().with_server(ServerBehavior::Fail),
        vec![Answer::Select(0), Answer::Confirm(true), Answer::Select(2)],
    );

    let error = harness.dev().await.unwrap_err();

    assert!(matches!(error, Error::Server(_)));
    assert!(error.to_string().starts_with("Dev server error"));
}

#[tokio::test]
async fn test_cancelled_selection_exits_cleanly() {
    let harness = Harness::new(typical_store(), vec![Answer::Cancel]);

    let outcome = harness.dev().await.unwrap();

    assert_eq!(
        outcome,
        WorkflowOutcome::Cancelled(CancelReason::SelectionCancelled)
    );
    assert!(harness.commands.side_effects().is_empty());
}

#[tokio::test]
async fn test_declined_confirmation_exits_cleanly() {
    let harness = Harness::new(
        typical_store(),
        vec![Answer::Select(0), Answer::Confirm(false)],
    );

    let outcome = harness.dev().await.unwrap();

    assert_eq!(outcome, WorkflowOutcome::Cancelled(CancelReason::Declined));
    assert_eq!(CancelReason::Declined.to_string(), "Aborted by user");
    assert!(harness.commands.side_effects().is_empty());
    assert!(harness.observer.any(|e| matches!(
        e,
        WorkflowEvent::Cancelled {
            reason: CancelReason::Declined
        }
    )));
}

#[tokio::test]
async fn test_dev_confirmation_defaults_to_yes() {
    let harness = Harness::new(
        typical_store(),
        vec![Answer::Select(0), Answer::Default, Answer::Select(2)],
    );

    harness.dev().await.unwrap();

    assert_eq!(harness.commands.side_effects(), vec![Invocation::Serve(5)]);
    assert_eq!(harness.prompter.asked()[1].prompt, "Proceed with development?");
}

#[tokio::test]
async fn test_cancelled_sync_choice_exits_cleanly() {
    let harness = Harness::new(
        typical_store(),
        vec![Answer::Select(0), Answer::Confirm(true), Answer::Cancel],
    );

    let outcome = harness.dev().await.unwrap();

    assert_eq!(
        outcome,
        WorkflowOutcome::Cancelled(CancelReason::SyncChoiceCancelled)
    );
    assert!(harness.commands.side_effects().is_empty());
}

#[tokio::test]
async fn test_prompt_failure_is_an_error() {
    let harness = Harness::new(typical_store(), vec![Answer::Fail("not a terminal".to_string())]);

    let error = harness.dev().await.unwrap_err();

    assert!(matches!(error, Error::Prompt(_)));
    assert!(harness.commands.side_effects().is_empty());
}

#[tokio::test]
async fn test_out_of_range_selection_is_an_error() {
    let harness = Harness::new(typical_store(), vec![Answer::Select(9)]);

    let error = harness.dev().await.unwrap_err();

    assert!(matches!(error, Error::Prompt(_)));
    assert!(harness.commands.side_effects().is_empty());
}

#[tokio::test]
async fn test_push_always_pulls_from_live_then_pushes() {
    let harness = Harness::new(
        typical_store(),
        vec![Answer::SelectMatching("Old".to_string()), Answer::Confirm(true)],
    );

    let outcome = harness.push().await.unwrap();

    assert_eq!(
        outcome,
        WorkflowOutcome::Pushed {
            theme: Theme::new(3, "Old", "development"),
        }
    );
    assert_eq!(
        harness.commands.side_effects(),
        vec![
            Invocation::PullContent(PullSource::Live),
            Invocation::PushTheme(3),
        ]
    );

    let asked = harness.prompter.asked();
    assert_eq!(asked.len(), 2);
    assert_eq!(asked[0].prompt, "Select a theme to push to");
    assert_eq!(asked[1].prompt, "Push local files to Old (3)?");
}

#[tokio::test]
async fn test_push_confirmation_defaults_to_no() {
    let harness = Harness::new(typical_store(), vec![Answer::Select(0), Answer::Default]);

    let outcome = harness.push().await.unwrap();

    assert_eq!(outcome, WorkflowOutcome::Cancelled(CancelReason::Declined));
    assert!(harness.commands.side_effects().is_empty());
}

#[tokio::test]
async fn test_push_continues_after_failed_pull() {
    let harness = Harness::new(
        typical_store().with_pull_failure("timeout"),
        vec![Answer::Select(0), Answer::Confirm(true)],
    );

    let outcome = harness.push().await.unwrap();

    assert!(matches!(outcome, WorkflowOutcome::Pushed { .. }));
    assert_eq!(
        harness.commands.side_effects(),
        vec![Invocation::PullContent(PullSource::Live), Invocation::PushTheme(5)]
    );
}

#[tokio::test]
async fn test_push_failure_is_fatal() {
    let harness = Harness::new(
        typical_store().with_push_failure("Theme is locked"),
        vec![Answer::Select(0), Answer::Confirm(true)],
    );

    let error = harness.push().await.unwrap_err();

    assert!(matches!(error, Error::Push(_)));
    assert!(error.to_string().contains("Theme is locked"));
    assert!(
        !harness
            .observer
            .any(|e| matches!(e, WorkflowEvent::PushCompleted { .. }))
    );
}

#[tokio::test]
async fn test_list_returns_sorted_themes() {
    let harness = Harness::new(typical_store(), vec![]);

    let themes = harness
        .workflow(WorkflowOptions::dev())
        .list()
        .await
        .unwrap();

    let ids: Vec<u64> = themes.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![1, 5, 3]);
    assert!(harness.prompter.asked().is_empty());
    assert!(harness.observer.any(|e| matches!(
        e,
        WorkflowEvent::ThemesListed { themes } if themes.len() == 3
    )));
}

#[tokio::test]
async fn test_list_works_without_live_theme() {
    let themes = ThemeSetBuilder::new().development(3, "Old").build();
    let harness = Harness::new(MockThemeCommands::new().with_themes(themes), vec![]);

    let listed = harness
        .workflow(WorkflowOptions::dev())
        .list()
        .await
        .unwrap();

    assert_eq!(listed.len(), 1);
}

#[tokio::test]
async fn test_config_event_never_carries_token() {
    let harness = Harness::new(typical_store(), vec![Answer::Cancel]);

    harness.dev().await.unwrap();

    let events = harness.observer.events();
    assert_eq!(
        events[0],
        WorkflowEvent::ConfigLoaded {
            store: "example.myshopify.com".to_string(),
            environment: "development".to_string(),
        }
    );
    assert!(!format!("{events:?}").contains("shptka_test"));
}
