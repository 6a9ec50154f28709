//! Scroll-state navigation bar
//!
//! Derives the "on light background" flag from the current route and the
//! live scroll position, and maps it to link styling. The flag controls
//! whether nav links render for a dark hero section or a light page body.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// Fixed height of the navigation bar in layout units
pub const NAV_HEIGHT: f32 = 96.0;

/// Fallback threshold as a fraction of the viewport when the content
/// boundary element is absent
const FALLBACK_VIEWPORT_FRACTION: f32 = 0.6;

/// Application routes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Details,
    Success,
    Abstract,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Details => "/details",
            Route::Success => "/success",
            Route::Abstract => "/abstract",
        }
    }

    pub fn from_path(path: &str) -> Option<Route> {
        match path {
            "/" => Some(Route::Home),
            "/details" => Some(Route::Details),
            "/success" => Some(Route::Success),
            "/abstract" => Some(Route::Abstract),
            _ => None,
        }
    }

    /// The landing page is the only route with a dark hero under the nav
    pub fn is_root(&self) -> bool {
        matches!(self, Route::Home)
    }
}

/// Live scroll measurements delivered with each scroll event
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    /// Current vertical scroll offset
    pub offset: f32,
    /// Viewport height
    pub viewport_height: f32,
    /// Vertical offset of the named content boundary element, if mounted
    pub boundary_top: Option<f32>,
}

/// Scroll offset at which the nav transitions to light-background styling
pub fn light_threshold(metrics: &ScrollMetrics) -> f32 {
    match metrics.boundary_top {
        Some(top) => top - NAV_HEIGHT,
        None => FALLBACK_VIEWPORT_FRACTION * metrics.viewport_height,
    }
}

/// Derive the light-background flag for a route and scroll position.
///
/// Non-root routes are treated as already past the transition point.
pub fn on_light_background(route: Route, metrics: &ScrollMetrics) -> bool {
    if !route.is_root() {
        return true;
    }
    metrics.offset + NAV_HEIGHT >= light_threshold(metrics)
}

/// Visual style of a nav link; closed set of four variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleToken {
    ActiveOnLight,
    ActiveOnDark,
    InactiveOnLight,
    InactiveOnDark,
}

impl StyleToken {
    /// CSS classes the site markup uses for this variant
    pub fn class(&self) -> &'static str {
        match self {
            StyleToken::ActiveOnLight => "bg-blue-900 text-white",
            StyleToken::ActiveOnDark => "bg-white/20 text-white",
            StyleToken::InactiveOnLight => "text-gray-700 hover:text-blue-900 hover:bg-gray-100",
            StyleToken::InactiveOnDark => "text-gray-200 hover:text-white hover:bg-white/10",
        }
    }
}

/// Pure styling derivation: a link's visual class is a function of whether
/// its path is the active route and whether the nav sits on a light region.
pub fn link_style(is_active: bool, on_light: bool) -> StyleToken {
    match (is_active, on_light) {
        (true, true) => StyleToken::ActiveOnLight,
        (true, false) => StyleToken::ActiveOnDark,
        (false, true) => StyleToken::InactiveOnLight,
        (false, false) => StyleToken::InactiveOnDark,
    }
}

/// Navigation target of a nav link
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavTarget {
    Route(Route),
    /// External registration link shown to unregistered visitors
    External(String),
}

/// A rendered nav link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub target: NavTarget,
}

/// The link set depends on registration state: unregistered visitors get the
/// external Register/Login action; registered attendees get their ticket and
/// the abstract upload portal.
pub fn nav_links(is_registered: bool, register_url: &str) -> Vec<NavLink> {
    let mut links = vec![
        NavLink { label: "Home", target: NavTarget::Route(Route::Home) },
        NavLink { label: "Details", target: NavTarget::Route(Route::Details) },
    ];
    if is_registered {
        links.push(NavLink { label: "Ticket", target: NavTarget::Route(Route::Success) });
        links.push(NavLink {
            label: "Upload Abstract",
            target: NavTarget::Route(Route::Abstract),
        });
    } else {
        links.push(NavLink {
            label: "Register / Login",
            target: NavTarget::External(register_url.to_string()),
        });
    }
    links
}

type ScrollHandler = Arc<dyn Fn(&ScrollMetrics) + Send + Sync>;

/// Dispatcher for scroll events, owned by the embedding runtime.
///
/// Handlers are registered with [`ScrollEvents::subscribe`] and removed when
/// the returned [`ScrollSubscription`] is dropped, so a listener can never
/// outlive the component that attached it.
#[derive(Clone, Default)]
pub struct ScrollEvents {
    handlers: Arc<Mutex<HashMap<u64, ScrollHandler>>>,
    next_id: Arc<AtomicU64>,
}

impl ScrollEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a handler; detaches when the subscription is dropped
    pub fn subscribe(&self, handler: ScrollHandler) -> ScrollSubscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut handlers) = self.handlers.lock() {
            handlers.insert(id, handler);
        }
        ScrollSubscription { events: self.clone(), id }
    }

    /// Deliver a scroll event to every attached handler
    pub fn emit(&self, metrics: &ScrollMetrics) {
        let snapshot: Vec<ScrollHandler> = match self.handlers.lock() {
            Ok(handlers) => handlers.values().cloned().collect(),
            Err(_) => return,
        };
        for handler in snapshot {
            handler(metrics);
        }
    }

    /// Number of currently attached handlers
    pub fn listener_count(&self) -> usize {
        self.handlers.lock().map(|h| h.len()).unwrap_or(0)
    }

    fn detach(&self, id: u64) {
        if let Ok(mut handlers) = self.handlers.lock() {
            handlers.remove(&id);
        }
    }
}

/// Scoped listener registration; detaches on drop
pub struct ScrollSubscription {
    events: ScrollEvents,
    id: u64,
}

impl Drop for ScrollSubscription {
    fn drop(&mut self) {
        self.events.detach(self.id);
    }
}

/// The navigation bar component.
///
/// Mounting computes the light-background flag immediately, so initial state
/// is correct before any scroll event fires, and attaches a scroll listener
/// when (and only when) the current route is the landing page. Navigating
/// tears the listener down and re-establishes it for the new route.
pub struct NavBar {
    route: Route,
    on_light: Arc<AtomicBool>,
    subscription: Option<ScrollSubscription>,
}

impl NavBar {
    /// Mount the nav bar for a route
    pub fn mount(route: Route, events: &ScrollEvents, initial: &ScrollMetrics) -> Self {
        let mut nav = Self {
            route,
            on_light: Arc::new(AtomicBool::new(true)),
            subscription: None,
        };
        nav.attach(events, initial);
        nav
    }

    /// Route change: recompute and re-establish the listener
    pub fn navigate(&mut self, route: Route, events: &ScrollEvents, current: &ScrollMetrics) {
        // Drop the old subscription before attaching so listeners never
        // accumulate across rapid route changes.
        self.subscription = None;
        self.route = route;
        self.attach(events, current);
    }

    fn attach(&mut self, events: &ScrollEvents, current: &ScrollMetrics) {
        let flag = on_light_background(self.route, current);
        self.on_light.store(flag, Ordering::Relaxed);
        log::debug!("nav mounted on {} (on_light={})", self.route.path(), flag);

        if self.route.is_root() {
            let route = self.route;
            let on_light = self.on_light.clone();
            self.subscription = Some(events.subscribe(Arc::new(move |metrics| {
                on_light.store(on_light_background(route, metrics), Ordering::Relaxed);
            })));
        }
    }

    pub fn route(&self) -> Route {
        self.route
    }

    /// Current value of the derived light-background flag
    pub fn on_light_background(&self) -> bool {
        self.on_light.load(Ordering::Relaxed)
    }

    /// Style for a link to `target` given the current route and flag
    pub fn link_style(&self, target: Route) -> StyleToken {
        link_style(self.route == target, self.on_light_background())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(offset: f32, viewport: f32, boundary: Option<f32>) -> ScrollMetrics {
        ScrollMetrics { offset, viewport_height: viewport, boundary_top: boundary }
    }

    #[test]
    fn route_paths_round_trip() {
        for route in [Route::Home, Route::Details, Route::Success, Route::Abstract] {
            assert_eq!(Route::from_path(route.path()), Some(route));
        }
        assert_eq!(Route::from_path("/register"), None);
    }

    #[test]
    fn non_root_routes_are_always_light() {
        for route in [Route::Details, Route::Success, Route::Abstract] {
            assert!(on_light_background(route, &metrics(0.0, 900.0, Some(5000.0))));
            assert!(on_light_background(route, &metrics(0.0, 900.0, None)));
        }
    }

    #[test]
    fn boundary_threshold_uses_nav_height() {
        // boundary at 800 => threshold 800 - 96 = 704; flag when offset + 96 >= 704
        let boundary = Some(800.0);
        assert!(!on_light_background(Route::Home, &metrics(607.9, 900.0, boundary)));
        assert!(on_light_background(Route::Home, &metrics(608.0, 900.0, boundary)));
    }

    #[test]
    fn fallback_threshold_is_sixty_percent_of_viewport() {
        // threshold = 0.6 * 1000 = 600; flag exactly when offset + 96 >= 600
        assert!(!on_light_background(Route::Home, &metrics(503.9, 1000.0, None)));
        assert!(on_light_background(Route::Home, &metrics(504.0, 1000.0, None)));
    }

    #[test]
    fn zero_height_viewport_is_immediately_light() {
        assert!(on_light_background(Route::Home, &metrics(0.0, 0.0, None)));
    }

    #[test]
    fn flag_is_monotonic_in_scroll_offset() {
        let mut seen_light = false;
        for step in 0..2000 {
            let flag = on_light_background(Route::Home, &metrics(step as f32, 900.0, Some(750.0)));
            if seen_light {
                assert!(flag, "flag flickered back to false at offset {}", step);
            }
            seen_light |= flag;
        }
        assert!(seen_light);
    }

    #[test]
    fn link_style_truth_table() {
        assert_eq!(link_style(true, true), StyleToken::ActiveOnLight);
        assert_eq!(link_style(true, false), StyleToken::ActiveOnDark);
        assert_eq!(link_style(false, true), StyleToken::InactiveOnLight);
        assert_eq!(link_style(false, false), StyleToken::InactiveOnDark);
    }

    #[test]
    fn style_classes_are_distinct() {
        let classes = [
            StyleToken::ActiveOnLight.class(),
            StyleToken::ActiveOnDark.class(),
            StyleToken::InactiveOnLight.class(),
            StyleToken::InactiveOnDark.class(),
        ];
        for (i, a) in classes.iter().enumerate() {
            for b in classes.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn nav_links_depend_on_registration() {
        let anon = nav_links(false, "https://example.org/register");
        assert!(anon.iter().any(|l| matches!(&l.target, NavTarget::External(u) if u.contains("register"))));
        assert!(!anon.iter().any(|l| l.target == NavTarget::Route(Route::Success)));

        let registered = nav_links(true, "https://example.org/register");
        assert!(registered.iter().any(|l| l.target == NavTarget::Route(Route::Success)));
        assert!(registered.iter().any(|l| l.target == NavTarget::Route(Route::Abstract)));
        assert!(!registered.iter().any(|l| matches!(l.target, NavTarget::External(_))));
    }

    #[test]
    fn mount_computes_initial_state_without_scroll() {
        let events = ScrollEvents::new();
        let nav = NavBar::mount(Route::Home, &events, &metrics(900.0, 1000.0, None));
        assert!(nav.on_light_background());

        let nav = NavBar::mount(Route::Home, &events, &metrics(0.0, 1000.0, None));
        assert!(!nav.on_light_background());
    }

    #[test]
    fn scroll_events_update_mounted_nav() {
        let events = ScrollEvents::new();
        let nav = NavBar::mount(Route::Home, &events, &metrics(0.0, 1000.0, None));
        assert!(!nav.on_light_background());

        events.emit(&metrics(700.0, 1000.0, None));
        assert!(nav.on_light_background());

        events.emit(&metrics(0.0, 1000.0, None));
        assert!(!nav.on_light_background());
    }

    #[test]
    fn route_changes_never_accumulate_listeners() {
        let events = ScrollEvents::new();
        let mut nav = NavBar::mount(Route::Home, &events, &metrics(0.0, 1000.0, None));
        assert_eq!(events.listener_count(), 1);

        for _ in 0..10 {
            nav.navigate(Route::Details, &events, &metrics(0.0, 1000.0, None));
            assert_eq!(events.listener_count(), 0);
            nav.navigate(Route::Home, &events, &metrics(0.0, 1000.0, None));
            assert_eq!(events.listener_count(), 1);
        }

        drop(nav);
        assert_eq!(events.listener_count(), 0);
    }

    #[test]
    fn non_root_nav_ignores_scroll() {
        let events = ScrollEvents::new();
        let nav = NavBar::mount(Route::Details, &events, &metrics(0.0, 1000.0, None));
        assert!(nav.on_light_background());
        events.emit(&metrics(0.0, 1000.0, Some(10_000.0)));
        assert!(nav.on_light_background());
    }

    #[test]
    fn active_link_styling_follows_route() {
        let events = ScrollEvents::new();
        let nav = NavBar::mount(Route::Details, &events, &metrics(0.0, 1000.0, None));
        assert_eq!(nav.link_style(Route::Details), StyleToken::ActiveOnLight);
        assert_eq!(nav.link_style(Route::Home), StyleToken::InactiveOnLight);
    }
}
