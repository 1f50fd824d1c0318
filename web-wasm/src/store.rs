//! リアクティブシグナル上のセッション

use candidate_eval_common::{Session, SessionStore};
use leptos::prelude::*;

/// `RwSignal<Session>` を orchestrator から使うためのラッパー
///
/// コンポーネント破棄後はシグナルも破棄されるため、更新は None になる。
#[derive(Clone, Copy)]
pub struct SignalStore(pub RwSignal<Session>);

impl SessionStore for SignalStore {
    fn update<R>(&self, f: impl FnOnce(&mut Session) -> R) -> Option<R> {
        self.0.try_update(f)
    }

    fn with<R>(&self, f: impl FnOnce(&Session) -> R) -> Option<R> {
        self.0.try_with(f)
    }
}
