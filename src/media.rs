use crate::listener::Listener;
use web_sys as web;

/// Watches the desktop breakpoint and reports each crossing.
pub struct BreakpointWatcher {
    query: web::MediaQueryList,
    _change: Listener,
}

impl BreakpointWatcher {
    pub fn new(media_query: &str, mut on_change: impl FnMut(bool) + 'static) -> anyhow::Result<Self> {
        let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        let query = window
            .match_media(media_query)
            .map_err(|e| anyhow::anyhow!("matchMedia: {:?}", e))?
            .ok_or_else(|| anyhow::anyhow!("matchMedia unsupported"))?;
        let query_for_change = query.clone();
        let change = Listener::new(&query, "change", move |_| {
            on_change(query_for_change.matches());
        })?;
        Ok(Self {
            query,
            _change: change,
        })
    }

    pub fn matches(&self) -> bool {
        self.query.matches()
    }
}
