//! Click routing: resolve a target path from notification data and land
//! the user in a window showing it.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use notify_core::result::AppResult;

/// Fallback route when no action can be resolved.
const DEFAULT_ROUTE: &str = "/";

/// Resolve the target path from a notification's attached data.
///
/// Supports the current object shape (`{"action": "/circles"}`) and the
/// legacy bare-string form (`"/circles"`), defaulting to `/`.
pub fn resolve_action(data: Option<&serde_json::Value>) -> String {
    let Some(action) = data.and_then(|d| d.get("action")) else {
        return DEFAULT_ROUTE.to_string();
    };

    match action {
        serde_json::Value::String(path) if !path.is_empty() => path.clone(),
        serde_json::Value::Object(fields) => fields
            .get("action")
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_ROUTE)
            .to_string(),
        _ => DEFAULT_ROUTE.to_string(),
    }
}

/// A window/tab known to the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientWindow {
    /// Opaque client identifier.
    pub id: String,
    /// The path the client currently shows.
    pub path: String,
}

/// The platform's window roster.
#[async_trait]
pub trait ClientSurface: Send + Sync + std::fmt::Debug + 'static {
    /// Windows currently open, in platform order.
    async fn clients(&self) -> AppResult<Vec<ClientWindow>>;

    /// Bring a window to the front.
    async fn focus(&self, id: &str) -> AppResult<()>;

    /// Navigate a window to a path.
    async fn navigate(&self, id: &str, path: &str) -> AppResult<()>;

    /// Open a new window at a path.
    async fn open(&self, path: &str) -> AppResult<()>;
}

/// Client surface for headless hosts: no windows exist, opens are logged
/// and handed to the platform-specific launcher (none in a server).
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadlessSurface;

#[async_trait]
impl ClientSurface for HeadlessSurface {
    async fn clients(&self) -> AppResult<Vec<ClientWindow>> {
        Ok(Vec::new())
    }

    async fn focus(&self, _id: &str) -> AppResult<()> {
        Ok(())
    }

    async fn navigate(&self, _id: &str, _path: &str) -> AppResult<()> {
        Ok(())
    }

    async fn open(&self, path: &str) -> AppResult<()> {
        debug!(path, "Open requested on a headless surface");
        Ok(())
    }
}

/// Lands notification clicks in a window.
#[derive(Debug)]
pub struct ClickRouter {
    surface: Arc<dyn ClientSurface>,
}

impl ClickRouter {
    /// Create a router over a client surface.
    pub fn new(surface: Arc<dyn ClientSurface>) -> Self {
        Self { surface }
    }

    /// Route a click: prefer focusing a window already at the target
    /// path, else focus-and-navigate the first window, else open a new
    /// one. Returns the resolved path.
    pub async fn route_click(&self, data: Option<&serde_json::Value>) -> AppResult<String> {
        let path = resolve_action(data);
        debug!(path, "Routing notification click");

        let clients = self.surface.clients().await?;

        if let Some(window) = clients.iter().find(|c| c.path == path) {
            self.surface.focus(&window.id).await?;
        } else if let Some(window) = clients.first() {
            self.surface.focus(&window.id).await?;
            self.surface.navigate(&window.id, &path).await?;
        } else {
            self.surface.open(&path).await?;
        }

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[test]
    fn test_resolve_object_shape() {
        let data = serde_json::json!({"action": {"action": "/circles"}});
        assert_eq!(resolve_action(Some(&data)), "/circles");
    }

    #[test]
    fn test_resolve_legacy_bare_string() {
        let data = serde_json::json!({"action": "/goals"});
        assert_eq!(resolve_action(Some(&data)), "/goals");
    }

    #[test]
    fn test_resolve_defaults_to_root() {
        assert_eq!(resolve_action(None), "/");
        let data = serde_json::json!({"action": 7});
        assert_eq!(resolve_action(Some(&data)), "/");
    }

    /// Records every surface call for assertion.
    #[derive(Debug, Default)]
    struct FakeSurface {
        windows: Vec<ClientWindow>,
        calls: Mutex<Vec<String>>,
    }

    impl FakeSurface {
        fn with_windows(windows: Vec<ClientWindow>) -> Arc<Self> {
            Arc::new(Self {
                windows,
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ClientSurface for FakeSurface {
        async fn clients(&self) -> AppResult<Vec<ClientWindow>> {
            Ok(self.windows.clone())
        }

        async fn focus(&self, id: &str) -> AppResult<()> {
            self.calls.lock().unwrap().push(format!("focus:{id}"));
            Ok(())
        }

        async fn navigate(&self, id: &str, path: &str) -> AppResult<()> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("navigate:{id}:{path}"));
            Ok(())
        }

        async fn open(&self, path: &str) -> AppResult<()> {
            self.calls.lock().unwrap().push(format!("open:{path}"));
            Ok(())
        }
    }

    fn click_data(path: &str) -> serde_json::Value {
        serde_json::json!({"action": path})
    }

    #[tokio::test]
    async fn test_focuses_matching_window() {
        let surface = FakeSurface::with_windows(vec![
            ClientWindow {
                id: "w1".to_string(),
                path: "/".to_string(),
            },
            ClientWindow {
                id: "w2".to_string(),
                path: "/circles".to_string(),
            },
        ]);
        let router = ClickRouter::new(surface.clone());

        router
            .route_click(Some(&click_data("/circles")))
            .await
            .unwrap();
        assert_eq!(surface.calls(), vec!["focus:w2"]);
    }

    #[tokio::test]
    async fn test_navigates_first_window_when_no_match() {
        let surface = FakeSurface::with_windows(vec![ClientWindow {
            id: "w1".to_string(),
            path: "/".to_string(),
        }]);
        let router = ClickRouter::new(surface.clone());

        router
            .route_click(Some(&click_data("/goals")))
            .await
            .unwrap();
        assert_eq!(surface.calls(), vec!["focus:w1", "navigate:w1:/goals"]);
    }

    #[tokio::test]
    async fn test_opens_new_window_when_none_exist() {
        let surface = FakeSurface::with_windows(vec![]);
        let router = ClickRouter::new(surface.clone());

        router
            .route_click(Some(&click_data("/referrals")))
            .await
            .unwrap();
        assert_eq!(surface.calls(), vec!["open:/referrals"]);
    }
}
