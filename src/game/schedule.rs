/// Ordered list of `(offset_ms, event)` pairs fired by a virtual clock.
/// Events with equal offsets fire in insertion order.
#[derive(Clone, Debug)]
pub struct Timeline<E> {
    elapsed_ms: u64,
    sequence: usize,
    // Sorted descending so the next due event is at the end.
    events: Vec<(u64, usize, E)>,
}

impl<E> Timeline<E> {
    pub fn new() -> Self {
        Timeline {
            elapsed_ms: 0,
            sequence: 0,
            events: Vec::new(),
        }
    }

    pub fn from_events(events: impl IntoIterator<Item = (u64, E)>) -> Self {
        let mut timeline = Timeline::new();
        for (offset, event) in events {
            timeline.schedule(offset, event);
        }
        timeline
    }

    /// Schedules at an absolute offset from the timeline's start.
    pub fn schedule(&mut self, offset_ms: u64, event: E) {
        self.events.push((offset_ms, self.sequence, event));
        self.sequence += 1;
        self.events
            .sort_by_key(|&(offset, sequence, _)| std::cmp::Reverse((offset, sequence)));
    }

    /// Advances the clock and returns every event now due, earliest first.
    pub fn advance(&mut self, ms: u64) -> Vec<E> {
        self.elapsed_ms += ms;
        let mut due = Vec::new();
        while let Some(&(offset, _, _)) = self.events.last() {
            if offset > self.elapsed_ms {
                break;
            }
            if let Some((_, _, event)) = self.events.pop() {
                due.push(event);
            }
        }
        due
    }

    /// Time until the last pending event is due.
    pub fn remaining(&self) -> u64 {
        self.events
            .first()
            .map(|&(offset, _, _)| offset.saturating_sub(self.elapsed_ms))
            .unwrap_or(0)
    }

    #[cfg(test)]
    pub fn elapsed(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn is_over(&self) -> bool {
        self.events.is_empty()
    }
}

impl<E> Default for Timeline<E> {
    fn default() -> Self {
        Timeline::new()
    }
}
