//! Shared-modal delete routing
//!
//! Every delete control on the page opens one of two shared confirmation
//! dialogs. Each open binds a fresh [`DeleteContext`] to the dialog's flow,
//! so a confirm always acts on the most recently opened target.
//!
//! Per-flow state machine:
//!
//! ```text
//! Idle --open--> Armed --confirm--> Deleting --ok--> Idle
//!                  ^  \--dismiss--> Idle        |
//!                  |                            |
//!                  +-----------failure----------+
//! ```

use crate::error::RouterError;
use parking_lot::Mutex;
use std::sync::Arc;
use timeline_client::{DeleteError, Deleter};
use timeline_types::{DeleteContext, DeleteTrigger, FlowKind};

/// Completion-action seam
#[cfg_attr(test, mockall::automock)]
pub trait Navigator: Send + Sync {
    /// Reload the current view
    fn reload(&self);

    /// Navigate to a path
    fn redirect(&self, path: &str);
}

/// What happens after a successful delete
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionAction {
    /// Reload the current view
    Reload,
    /// Redirect to a path
    Redirect(String),
}

impl CompletionAction {
    /// Completion for a context: items reload, resources go to the owner's page
    #[must_use]
    pub fn for_context(context: &DeleteContext) -> Self {
        match context.owner_username() {
            None => Self::Reload,
            Some(owner) => Self::Redirect(format!("/{owner}")),
        }
    }

    fn run(&self, navigator: &dyn Navigator) {
        match self {
            Self::Reload => navigator.reload(),
            Self::Redirect(path) => navigator.redirect(path),
        }
    }
}

impl std::fmt::Display for CompletionAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Reload => f.write_str("reload"),
            Self::Redirect(path) => write!(f, "redirect {path}"),
        }
    }
}

/// Phase of a flow, without its context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowPhase {
    /// No dialog open
    Idle,
    /// Dialog open with a bound context
    Armed,
    /// Delete request in flight
    Deleting,
}

/// Validate a flow phase transition
///
/// # Errors
/// - `RouterError::IllegalTransition` if `to` is not reachable from `from`
pub fn validate_transition(from: FlowPhase, to: FlowPhase) -> Result<(), RouterError> {
    if allowed_transitions(from).contains(&to) {
        Ok(())
    } else {
        Err(RouterError::IllegalTransition { from, to })
    }
}

/// Phases reachable from `from`
#[must_use]
pub fn allowed_transitions(from: FlowPhase) -> Vec<FlowPhase> {
    use FlowPhase::*;
    match from {
        Idle => vec![Armed],
        Armed => vec![Armed, Deleting, Idle],
        Deleting => vec![Idle, Armed],
    }
}

/// State of one flow
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FlowState {
    /// No dialog open
    #[default]
    Idle,
    /// Dialog open, confirm will delete this context's target
    Armed(DeleteContext),
    /// Request for this context in flight
    Deleting(DeleteContext),
}

impl FlowState {
    /// Phase of this state
    #[inline]
    #[must_use]
    pub fn phase(&self) -> FlowPhase {
        match self {
            FlowState::Idle => FlowPhase::Idle,
            FlowState::Armed(_) => FlowPhase::Armed,
            FlowState::Deleting(_) => FlowPhase::Deleting,
        }
    }

    /// Bound context, if any
    #[inline]
    #[must_use]
    pub fn context(&self) -> Option<&DeleteContext> {
        match self {
            FlowState::Idle => None,
            FlowState::Armed(ctx) | FlowState::Deleting(ctx) => Some(ctx),
        }
    }
}

/// Successful delete
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteOutcome {
    /// Context the request was issued for
    pub context: DeleteContext,
    /// Completion action that ran
    pub action: CompletionAction,
    /// The cycle was dismissed or replaced before the response arrived
    pub abandoned: bool,
}

#[derive(Debug, Default)]
struct Flow {
    state: FlowState,
    /// Bumped on every open; a response only touches state of its own cycle
    generation: u64,
    last_error: Option<DeleteError>,
}

impl Flow {
    fn transition(&mut self, next: FlowState) -> Result<(), RouterError> {
        validate_transition(self.state.phase(), next.phase())?;
        self.state = next;
        Ok(())
    }
}

#[derive(Debug, Default)]
struct Flows {
    item: Flow,
    resource: Flow,
}

impl Flows {
    fn get(&self, kind: FlowKind) -> &Flow {
        match kind {
            FlowKind::ItemDelete => &self.item,
            FlowKind::ResourceDelete => &self.resource,
        }
    }

    fn get_mut(&mut self, kind: FlowKind) -> &mut Flow {
        match kind {
            FlowKind::ItemDelete => &mut self.item,
            FlowKind::ResourceDelete => &mut self.resource,
        }
    }
}

/// Routes open / confirm / dismiss signals for the two shared dialogs
pub struct DeleteActionRouter {
    deleter: Arc<dyn Deleter>,
    navigator: Arc<dyn Navigator>,
    flows: Mutex<Flows>,
}

impl DeleteActionRouter {
    /// Create router with both flows idle
    #[must_use]
    pub fn new(deleter: Arc<dyn Deleter>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            deleter,
            navigator,
            flows: Mutex::new(Flows::default()),
        }
    }

    /// Open signal from a delete control
    ///
    /// Binds a fresh context to the trigger's flow, replacing whatever that
    /// flow held. An armed dialog of the other flow is dismissed. At most one
    /// dialog is ever open, and a dialog with a request in flight stays open
    /// until it settles or is dismissed.
    ///
    /// # Errors
    /// - `RouterError::Busy` naming whichever flow has a request in flight
    pub fn open(&self, trigger: &DeleteTrigger) -> Result<(), RouterError> {
        let kind = trigger.flow();
        let context = DeleteContext::from_trigger(trigger);
        let mut flows = self.flows.lock();

        for busy in [kind, kind.other()] {
            if flows.get(busy).state.phase() == FlowPhase::Deleting {
                return Err(RouterError::Busy(busy));
            }
        }

        let other = flows.get_mut(kind.other());
        if other.state.phase() == FlowPhase::Armed {
            other.transition(FlowState::Idle)?;
            tracing::debug!(flow = %kind.other(), "dismissed by other flow");
        }

        let flow = flows.get_mut(kind);
        tracing::debug!(flow = %kind, url = %context.target_url, "armed");
        flow.transition(FlowState::Armed(context))?;
        flow.generation += 1;
        flow.last_error = None;
        Ok(())
    }

    /// Confirm signal on a flow's dialog
    ///
    /// # Errors
    /// - `RouterError::NotArmed` if the flow has no bound context; no request
    ///   is issued
    /// - `RouterError::Busy` if the flow already has a request in flight
    /// - `RouterError::Delete` if the server did not accept the request; the
    ///   flow is re-armed with the same context
    #[tracing::instrument(skip(self))]
    pub async fn confirm(&self, kind: FlowKind) -> Result<DeleteOutcome, RouterError> {
        let (context, generation) = {
            let mut flows = self.flows.lock();
            let flow = flows.get_mut(kind);
            let context = match &flow.state {
                FlowState::Armed(ctx) => ctx.clone(),
                FlowState::Deleting(_) => return Err(RouterError::Busy(kind)),
                FlowState::Idle => return Err(RouterError::NotArmed(kind)),
            };
            flow.transition(FlowState::Deleting(context.clone()))?;
            (context, flow.generation)
        };

        let result = self.deleter.delete(&context.target_url).await;

        let current = {
            let mut flows = self.flows.lock();
            let flow = flows.get_mut(kind);
            let current =
                flow.generation == generation && flow.state.phase() == FlowPhase::Deleting;
            if current {
                match &result {
                    Ok(()) => flow.transition(FlowState::Idle)?,
                    Err(e) => {
                        flow.transition(FlowState::Armed(context.clone()))?;
                        flow.last_error = Some(e.clone());
                    }
                }
            }
            current
        };

        match result {
            Ok(()) => {
                let action = CompletionAction::for_context(&context);
                tracing::info!(url = %context.target_url, %action, abandoned = !current, "deleted");
                action.run(self.navigator.as_ref());
                Ok(DeleteOutcome {
                    context,
                    action,
                    abandoned: !current,
                })
            }
            Err(e) => {
                tracing::warn!(url = %context.target_url, error = %e, "delete failed");
                Err(RouterError::Delete(e))
            }
        }
    }

    /// Dismiss signal on a flow's dialog
    ///
    /// Discards the bound context. A request already in flight is not
    /// recalled; its response no longer changes this flow's state.
    /// Returns the phase the flow was in.
    pub fn dismiss(&self, kind: FlowKind) -> FlowPhase {
        let mut flows = self.flows.lock();
        let flow = flows.get_mut(kind);
        let phase = flow.state.phase();
        if phase != FlowPhase::Idle {
            flow.state = FlowState::Idle;
            tracing::debug!(flow = %kind, from = ?phase, "dismissed");
        }
        phase
    }

    /// Current state of a flow
    #[must_use]
    pub fn state(&self, kind: FlowKind) -> FlowState {
        self.flows.lock().get(kind).state.clone()
    }

    /// Failure of the flow's last confirm, cleared by the next open or success
    #[must_use]
    pub fn last_error(&self, kind: FlowKind) -> Option<DeleteError> {
        self.flows.lock().get(kind).last_error.clone()
    }
}

impl std::fmt::Debug for DeleteActionRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeleteActionRouter")
            .field("flows", &*self.flows.lock())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mockall::predicate::eq;
    use std::sync::Mutex as StdMutex;

    #[derive(Default)]
    struct StubDeleter {
        requests: StdMutex<Vec<String>>,
        fail_with: Option<DeleteError>,
    }

    #[async_trait]
    impl Deleter for StubDeleter {
        async fn delete(&self, target_url: &str) -> Result<(), DeleteError> {
            self.requests.lock().unwrap().push(target_url.to_string());
            match &self.fail_with {
                Some(e) => Err(e.clone()),
                None => Ok(()),
            }
        }
    }

    fn router(deleter: Arc<StubDeleter>, navigator: MockNavigator) -> DeleteActionRouter {
        DeleteActionRouter::new(deleter, Arc::new(navigator))
    }

    #[test]
    fn transitions() {
        assert!(validate_transition(FlowPhase::Idle, FlowPhase::Armed).is_ok());
        assert!(validate_transition(FlowPhase::Armed, FlowPhase::Armed).is_ok());
        assert!(validate_transition(FlowPhase::Deleting, FlowPhase::Armed).is_ok());
        assert_eq!(
            validate_transition(FlowPhase::Idle, FlowPhase::Deleting),
            Err(RouterError::IllegalTransition {
                from: FlowPhase::Idle,
                to: FlowPhase::Deleting
            })
        );
        assert!(!allowed_transitions(FlowPhase::Deleting).contains(&FlowPhase::Deleting));
    }

    #[tokio::test]
    async fn item_delete_reloads() {
        let deleter = Arc::new(StubDeleter::default());
        let mut navigator = MockNavigator::new();
        navigator.expect_reload().times(1).return_const(());
        navigator.expect_redirect().never();
        let router = router(deleter.clone(), navigator);

        router.open(&DeleteTrigger::item("/api/edit/3")).unwrap();
        let outcome = router.confirm(FlowKind::ItemDelete).await.unwrap();

        assert_eq!(outcome.action, CompletionAction::Reload);
        assert!(!outcome.abandoned);
        assert_eq!(*deleter.requests.lock().unwrap(), vec!["/api/edit/3"]);
        assert_eq!(router.state(FlowKind::ItemDelete), FlowState::Idle);
    }

    #[tokio::test]
    async fn resource_delete_redirects_to_owner() {
        let deleter = Arc::new(StubDeleter::default());
        let mut navigator = MockNavigator::new();
        navigator
            .expect_redirect()
            .with(eq("/alice"))
            .times(1)
            .return_const(());
        navigator.expect_reload().never();
        let router = router(deleter, navigator);

        router
            .open(&DeleteTrigger::resource("/api/recipes/7", "alice"))
            .unwrap();
        let outcome = router.confirm(FlowKind::ResourceDelete).await.unwrap();
        assert_eq!(outcome.action, CompletionAction::Redirect("/alice".to_string()));
    }

    #[tokio::test]
    async fn confirm_without_open_sends_nothing() {
        let deleter = Arc::new(StubDeleter::default());
        let mut navigator = MockNavigator::new();
        navigator.expect_reload().never();
        let router = router(deleter.clone(), navigator);

        assert_eq!(
            router.confirm(FlowKind::ItemDelete).await,
            Err(RouterError::NotArmed(FlowKind::ItemDelete))
        );
        assert!(deleter.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn failure_rearms_without_completion() {
        let deleter = Arc::new(StubDeleter {
            fail_with: Some(DeleteError::Status {
                url: "/api/edit/1".to_string(),
                status: 409,
                message: Some("Cannot delete creation edit".to_string()),
            }),
            ..StubDeleter::default()
        });
        let mut navigator = MockNavigator::new();
        navigator.expect_reload().never();
        let router = router(deleter, navigator);

        router.open(&DeleteTrigger::item("/api/edit/1")).unwrap();
        let err = router.confirm(FlowKind::ItemDelete).await.unwrap_err();

        assert!(matches!(err, RouterError::Delete(DeleteError::Status { status: 409, .. })));
        assert_eq!(
            router.state(FlowKind::ItemDelete).context().map(|c| c.target_url.as_str()),
            Some("/api/edit/1")
        );
        assert_eq!(router.state(FlowKind::ItemDelete).phase(), FlowPhase::Armed);
        assert!(router.last_error(FlowKind::ItemDelete).is_some());
    }

    #[test]
    fn opening_one_flow_dismisses_the_other() {
        let router = router(Arc::new(StubDeleter::default()), MockNavigator::new());

        router.open(&DeleteTrigger::item("/api/edit/1")).unwrap();
        router
            .open(&DeleteTrigger::resource("/api/recipes/1", "bob"))
            .unwrap();

        assert_eq!(router.state(FlowKind::ItemDelete), FlowState::Idle);
        assert_eq!(router.state(FlowKind::ResourceDelete).phase(), FlowPhase::Armed);
    }

    #[test]
    fn dismiss_discards_context() {
        let router = router(Arc::new(StubDeleter::default()), MockNavigator::new());

        assert_eq!(router.dismiss(FlowKind::ItemDelete), FlowPhase::Idle);
        router.open(&DeleteTrigger::item("/api/edit/1")).unwrap();
        assert_eq!(router.dismiss(FlowKind::ItemDelete), FlowPhase::Armed);
        assert_eq!(router.state(FlowKind::ItemDelete), FlowState::Idle);
    }
}
