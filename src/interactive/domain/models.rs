use crate::schemas::Chunk;

/// Grid dimensions. Row 0 of each column is the query input; the rows
/// below it display that column's accumulated results.
pub const GRID_COLUMNS: usize = 5;
pub const GRID_ROWS: usize = 5;
pub const GRID_RESULT_ROWS: usize = GRID_ROWS - 1;

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Mode {
    List,
    Grid,
    Help,
}

/// The logical target a query's results are routed back to.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Region {
    List,
    Column(usize),
}

/// State for one in-flight (or finished) query against a region.
#[derive(Clone, Debug)]
pub struct QuerySession {
    pub id: u64,
    pub region: Region,
    pub query: String,
    pub chunks: Vec<Chunk>,
    pub summary: Option<String>,
}

/// Owns every region's accumulated result sequence plus the single
/// outstanding-query tracker.
///
/// Each submitted query gets a fresh id, which is sent with the outbound
/// frame. Inbound batches that echo an id are routed by it; batches
/// without one go to the active session. Either way a batch whose id is
/// no longer the active one is dropped; results for a superseded query
/// must never leak into a newer session's sequence.
#[derive(Debug, Default)]
pub struct SessionStore {
    next_id: u64,
    active: Option<u64>,
    sessions: Vec<QuerySession>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new session for `region`, discarding any previous session
    /// for the same region, and mark it the active (expected) one.
    pub fn begin(&mut self, region: Region, query: &str) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.sessions.retain(|session| session.region != region);
        self.sessions.push(QuerySession {
            id,
            region,
            query: query.to_string(),
            chunks: Vec::new(),
            summary: None,
        });
        self.active = Some(id);
        id
    }

    /// Append a batch to the session it belongs to. Returns the region
    /// that changed, or `None` when the batch was stale and dropped.
    pub fn append(&mut self, request_id: Option<u64>, chunks: Vec<Chunk>) -> Option<Region> {
        let id = request_id.or(self.active)?;
        if self.active != Some(id) {
            tracing::debug!("dropping stale result batch for request {id}");
            return None;
        }
        let session = self.sessions.iter_mut().find(|session| session.id == id)?;
        session.chunks.extend(chunks);
        Some(session.region)
    }

    /// Resolve an HTTP fallback response: the whole result set plus the
    /// LLM summary arrive at once.
    pub fn complete(
        &mut self,
        request_id: u64,
        summary: String,
        chunks: Vec<Chunk>,
    ) -> Option<Region> {
        if self.active != Some(request_id) {
            tracing::debug!("dropping stale search response for request {request_id}");
            return None;
        }
        let session = self
            .sessions
            .iter_mut()
            .find(|session| session.id == request_id)?;
        session.chunks.extend(chunks);
        session.summary = Some(summary);
        self.active = None;
        Some(session.region)
    }

    /// Terminate the active session on an error. The list view clears its
    /// accumulated sequence; a grid column keeps its cache (the error is
    /// surfaced in the status area instead). Returns the failed region.
    pub fn fail(&mut self) -> Option<Region> {
        let id = self.active.take()?;
        let session = self.sessions.iter_mut().find(|session| session.id == id)?;
        if session.region == Region::List {
            session.chunks.clear();
            session.summary = None;
        }
        Some(session.region)
    }

    /// Stop expecting results without touching rendered state, e.g. after
    /// a connection loss or an undecodable frame.
    pub fn abandon_active(&mut self) {
        self.active = None;
    }

    pub fn session(&self, region: Region) -> Option<&QuerySession> {
        self.sessions
            .iter()
            .find(|session| session.region == region)
    }

    pub fn active_region(&self) -> Option<Region> {
        let id = self.active?;
        self.sessions
            .iter()
            .find(|session| session.id == id)
            .map(|session| session.region)
    }
}
