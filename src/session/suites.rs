use crate::model::TempId;

/// An open suite: its handle and the start time the engine reported
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteFrame {
    pub temp_id: TempId,
    pub start_time: i64,
}

/// Currently open suites, innermost last.
///
/// The engine delivers suite ends in nesting order, so `pop` trusts the
/// structure and never checks which suite is ending.
#[derive(Debug, Default)]
pub struct SuiteStack {
    frames: Vec<SuiteFrame>,
}

impl SuiteStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, frame: SuiteFrame) {
        self.frames.push(frame);
    }

    pub fn peek(&self) -> Option<&SuiteFrame> {
        self.frames.last()
    }

    pub fn pop(&mut self) -> Option<SuiteFrame> {
        self.frames.pop()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(id: &str, start_time: i64) -> SuiteFrame {
        SuiteFrame {
            temp_id: TempId::new(id),
            start_time,
        }
    }

    #[test]
    fn test_well_nested_sequence_ends_empty() {
        let mut stack = SuiteStack::new();

        stack.push(frame("outer", 1));
        stack.push(frame("inner", 2));
        assert_eq!(stack.peek(), Some(&frame("inner", 2)));
        assert_eq!(stack.pop(), Some(frame("inner", 2)));

        stack.push(frame("sibling", 3));
        assert_eq!(stack.pop(), Some(frame("sibling", 3)));
        assert_eq!(stack.pop(), Some(frame("outer", 1)));

        assert!(stack.is_empty());
        assert_eq!(stack.peek(), None);
    }

    #[test]
    fn test_pop_on_empty_is_none() {
        let mut stack = SuiteStack::new();
        assert_eq!(stack.pop(), None);
        assert_eq!(stack.depth(), 0);
    }
}
