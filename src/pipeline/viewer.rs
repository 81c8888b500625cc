//! Sequential viewer state.
//!
//! A cursor over one ordered screen list. Out-of-range requests are ignored,
//! never panics. The shareable URL form is a 1-based `screen` parameter.

/// Navigation step requested by the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Next,
    Prev,
}

impl Step {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "next" => Some(Step::Next),
            "prev" => Some(Step::Prev),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewerCursor {
    len: usize,
    index: Option<usize>,
}

impl ViewerCursor {
    /// A closed cursor over a list of `len` screens.
    pub fn new(len: usize) -> Self {
        Self { len, index: None }
    }

    /// Restore from the 1-based URL parameter. Bad values give a closed cursor.
    pub fn from_param(len: usize, param: Option<&str>) -> Self {
        let mut cursor = Self::new(len);
        if let Some(position) = param.and_then(|p| p.trim().parse::<usize>().ok()) {
            if position >= 1 {
                cursor.open(position - 1);
            }
        }
        cursor
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn is_open(&self) -> bool {
        self.index.is_some()
    }

    /// Open at `index`; ignored when out of range.
    pub fn open(&mut self, index: usize) {
        if index < self.len {
            self.index = Some(index);
        }
    }

    pub fn advance(&mut self) {
        if let Some(i) = self.index {
            if i + 1 < self.len {
                self.index = Some(i + 1);
            }
        }
    }

    pub fn retreat(&mut self) {
        if let Some(i) = self.index {
            if i > 0 {
                self.index = Some(i - 1);
            }
        }
    }

    pub fn step(&mut self, step: Step) {
        match step {
            Step::Next => self.advance(),
            Step::Prev => self.retreat(),
        }
    }

    pub fn has_next(&self) -> bool {
        self.index.is_some_and(|i| i + 1 < self.len)
    }

    pub fn has_prev(&self) -> bool {
        self.index.is_some_and(|i| i > 0)
    }

    /// The 1-based URL parameter for the current position.
    pub fn to_param(&self) -> Option<String> {
        self.index.map(|i| (i + 1).to_string())
    }
}
