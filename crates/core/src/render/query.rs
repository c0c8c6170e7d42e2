//! Non-blocking occlusion query bookkeeping.
//!
//! The GPU answers an occlusion query some frames after it is issued, and
//! the engine never waits on it. Two query objects alternate: while one is
//! in flight the other is free to issue, and each frame polls the slot it
//! is about to reuse. The reported verdict therefore lags the issue by a
//! frame or two, which is acceptable for a draw-gating hint.
//!
//! The slot arithmetic lives in [`QuerySlots`], pure index math with no
//! GPU dependency; [`OcclusionProbe`] pairs it with the actual query
//! objects.

use crate::error::EngineError;

/// Tracks which of two query slots is free, which results are pending,
/// and the most recent verdict that has arrived.
#[derive(Debug, Clone, Default)]
pub struct QuerySlots {
    current: usize,
    in_flight: [bool; 2],
    last_result: Option<bool>,
}

impl QuerySlots {
    /// Creates slot state with both slots free and no result yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the slot the next issue would use.
    pub fn current(&self) -> usize {
        self.current
    }

    /// Whether the next slot is free, i.e. a new query may be issued.
    pub fn can_issue(&self) -> bool {
        !self.in_flight[self.current]
    }

    /// Whether the next slot has a result still pending retrieval.
    pub fn pending(&self) -> bool {
        self.in_flight[self.current]
    }

    /// Marks the current slot issued and flips to the other slot.
    pub fn issued(&mut self) {
        self.in_flight[self.current] = true;
        self.current = 1 - self.current;
    }

    /// Records an arrived verdict for the current slot, freeing it.
    pub fn retire(&mut self, passed: bool) {
        self.last_result = Some(passed);
        self.in_flight[self.current] = false;
    }

    /// Most recent verdict that has actually arrived, if any.
    pub fn result(&self) -> Option<bool> {
        self.last_result
    }
}

/// Double-buffered `ANY_SAMPLES_PASSED` query pair.
pub struct OcclusionProbe {
    queries: [glow::Query; 2],
    slots: QuerySlots,
}

impl OcclusionProbe {
    /// Allocates the two query objects.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Allocation`] if either query cannot be
    /// created.
    #[allow(unsafe_code)]
    pub fn new(gl: &glow::Context) -> Result<Self, EngineError> {
        use glow::HasContext;
        // SAFETY: create_query has no preconditions; the first handle is
        // deleted if the second allocation fails.
        unsafe {
            let a = gl.create_query().map_err(EngineError::Allocation)?;
            let b = match gl.create_query() {
                Ok(q) => q,
                Err(e) => {
                    gl.delete_query(a);
                    return Err(EngineError::Allocation(e));
                }
            };
            Ok(Self {
                queries: [a, b],
                slots: QuerySlots::new(),
            })
        }
    }

    /// Polls the slot that would be issued next; if its result has become
    /// available, records it and frees the slot. Never blocks. Returns the
    /// most recent verdict that has arrived, if any.
    #[allow(unsafe_code)]
    pub fn poll(&mut self, gl: &glow::Context) -> Option<bool> {
        use glow::HasContext;
        if self.slots.pending() {
            let query = self.queries[self.slots.current()];
            // SAFETY: query was issued via begin/end on this handle.
            let available =
                unsafe { gl.get_query_parameter_u32(query, glow::QUERY_RESULT_AVAILABLE) } != 0;
            if available {
                let passed =
                    unsafe { gl.get_query_parameter_u32(query, glow::QUERY_RESULT) } != 0;
                self.slots.retire(passed);
            }
        }
        self.slots.result()
    }

    /// Whether a new query may be issued this frame.
    pub fn can_issue(&self) -> bool {
        self.slots.can_issue()
    }

    /// Starts an `ANY_SAMPLES_PASSED` query on the free slot.
    ///
    /// Callers must check [`can_issue`](Self::can_issue) first; beginning
    /// over an in-flight slot would discard its pending result.
    #[allow(unsafe_code)]
    pub fn begin(&self, gl: &glow::Context) {
        use glow::HasContext;
        // SAFETY: the slot's query handle is valid and not active.
        unsafe { gl.begin_query(glow::ANY_SAMPLES_PASSED, self.queries[self.slots.current()]) };
    }

    /// Ends the active query and flips to the other slot.
    #[allow(unsafe_code)]
    pub fn end(&mut self, gl: &glow::Context) {
        use glow::HasContext;
        // SAFETY: a query on this target was begun by begin().
        unsafe { gl.end_query(glow::ANY_SAMPLES_PASSED) };
        self.slots.issued();
    }

    /// Deletes both query objects.
    #[allow(unsafe_code)]
    pub fn destroy(&self, gl: &glow::Context) {
        use glow::HasContext;
        // SAFETY: both handles are valid and deleted exactly once.
        unsafe {
            gl.delete_query(self.queries[0]);
            gl.delete_query(self.queries[1]);
        }
    }
}
