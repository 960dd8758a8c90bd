use ratatui::layout::Rect;
use tracing::debug;

pub(crate) const VISIBILITY_THRESHOLD: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum GateEvent {
    Start,
    Stop,
}

/// Turns intersection ratios into start/stop edges. The first observation
/// always reports its side; later ones only report crossings.
#[derive(Debug)]
pub(crate) struct VisibilityGate {
    threshold: f64,
    visible: Option<bool>,
    connected: bool,
}

impl Default for VisibilityGate {
    fn default() -> Self {
        Self::new(VISIBILITY_THRESHOLD)
    }
}

impl VisibilityGate {
    pub(crate) fn new(threshold: f64) -> Self {
        Self {
            threshold,
            visible: None,
            connected: true,
        }
    }

    #[cfg(test)]
    pub(crate) fn is_connected(&self) -> bool {
        self.connected
    }

    pub(crate) fn observe(&mut self, ratio: f64) -> Option<GateEvent> {
        if !self.connected {
            return None;
        }
        let visible = ratio >= self.threshold;
        if self.visible == Some(visible) {
            return None;
        }
        self.visible = Some(visible);
        debug!(ratio, visible, "visibility crossed threshold");
        Some(if visible {
            GateEvent::Start
        } else {
            GateEvent::Stop
        })
    }

    /// Forgets the last reported side so the next observation reports again.
    pub(crate) fn rearm(&mut self) {
        self.visible = None;
    }

    pub(crate) fn disconnect(&mut self) {
        self.connected = false;
    }
}

/// Fraction of `target` that lies inside `viewport`, in `0.0..=1.0`.
pub(crate) fn intersection_ratio(target: Rect, viewport: Rect) -> f64 {
    let target_area = target.area();
    if target_area == 0 {
        return 0.0;
    }
    let overlap = target.intersection(viewport);
    f64::from(overlap.area()) / f64::from(target_area)
}
