/// How a step relates to the current position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Completed,
    Current,
    Upcoming,
}

/// Result of asking the navigator to move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Moved,
    /// Already on the last step; the caller finalizes the session.
    AtEnd,
    /// The session is finished.
    Blocked,
}

/// Position within the step sequence of one loaded version.
///
/// `visited_max_index >= current_index` holds after every operation, and
/// nothing moves while `finished` is set except [`Navigator::exit_summary`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Navigator {
    step_count: usize,
    current: usize,
    visited_max: usize,
    finished: bool,
}

impl Navigator {
    pub fn new(step_count: usize) -> Self {
        Self {
            step_count,
            ..Self::default()
        }
    }

    pub fn step_count(&self) -> usize {
        self.step_count
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn visited_max_index(&self) -> usize {
        self.visited_max
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 >= self.step_count
    }

    pub fn status_of(&self, index: usize) -> StepStatus {
        match index.cmp(&self.current) {
            std::cmp::Ordering::Less => StepStatus::Completed,
            std::cmp::Ordering::Equal => StepStatus::Current,
            std::cmp::Ordering::Greater => StepStatus::Upcoming,
        }
    }

    /// Whether a step may be jumped to from the step list.
    pub fn is_reachable(&self, index: usize, gate_by_high_water: bool) -> bool {
        index < self.step_count && (!gate_by_high_water || index <= self.visited_max)
    }

    pub fn go_to(&mut self, index: usize) -> bool {
        if self.finished || index >= self.step_count {
            return false;
        }
        self.current = index;
        self.visited_max = self.visited_max.max(index);
        true
    }

    pub fn advance(&mut self) -> Advance {
        if self.finished {
            return Advance::Blocked;
        }
        if self.is_last() {
            return Advance::AtEnd;
        }
        self.current += 1;
        self.visited_max = self.visited_max.max(self.current);
        Advance::Moved
    }

    pub fn retreat(&mut self) -> bool {
        if self.finished || self.current == 0 {
            return false;
        }
        self.current -= 1;
        true
    }

    /// Enters the terminal state. Returns `false` when already finished.
    pub fn finish(&mut self) -> bool {
        if self.finished {
            return false;
        }
        self.finished = true;
        true
    }

    /// Leaves the terminal state, optionally landing on `target`.
    pub fn exit_summary(&mut self, target: Option<usize>) -> bool {
        if !self.finished {
            return false;
        }
        self.finished = false;
        if let Some(target) = target {
            self.go_to(target);
        }
        true
    }
}
