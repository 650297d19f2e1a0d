/***************************************/
/*        3rd party libraries          */
/***************************************/
use std::mem;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::{ElevatorId, Request, RequestId};

/***************************************/
/*       Public data structures        */
/***************************************/

/**
 * A request waiting to board.
 *
 * `claimed_by` is the elevator most recently given this request's origin as a
 * target. It is informational only: assignment never reserves a request, so a
 * later pass may hand the same origin floor to another elevator.
 */
#[derive(Debug, Clone, PartialEq)]
pub struct PendingRequest {
    pub request: Request,
    pub claimed_by: Option<ElevatorId>,
}

/// Requests not yet admitted onto any elevator, in submission order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PendingQueue {
    entries: Vec<PendingRequest>,
}

impl PendingQueue {
    pub fn new() -> PendingQueue {
        PendingQueue {
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, request: Request, claimed_by: Option<ElevatorId>) {
        self.entries.push(PendingRequest {
            request,
            claimed_by,
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PendingRequest> {
        self.entries.iter()
    }

    pub fn contains(&self, id: RequestId) -> bool {
        self.entries.iter().any(|entry| entry.request.id == id)
    }

    pub fn get(&self, id: RequestId) -> Option<&PendingRequest> {
        self.entries.iter().find(|entry| entry.request.id == id)
    }

    /// Snapshot of the queued requests, in order.
    pub fn requests(&self) -> Vec<Request> {
        self.entries.iter().map(|entry| entry.request.clone()).collect()
    }

    pub fn claim(&mut self, id: RequestId, elevator: ElevatorId) {
        if let Some(entry) = self.entries.iter_mut().find(|entry| entry.request.id == id) {
            entry.claimed_by = Some(elevator);
        }
    }

    pub fn remove(&mut self, id: RequestId) -> Option<PendingRequest> {
        let index = self
            .entries
            .iter()
            .position(|entry| entry.request.id == id)?;
        Some(self.entries.remove(index))
    }

    /// "origin->dest" for every queued request.
    pub fn summary(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|entry| entry.request.to_string())
            .collect()
    }

    /// Splits the queue in a single pass. Entries for which `admit` returns
    /// true leave the queue; the rest stay in their original order. `admit`
    /// is called once per entry, front to back.
    pub fn take_admitted<F>(&mut self, mut admit: F) -> Vec<Request>
    where
        F: FnMut(&Request) -> bool,
    {
        let (admitted, still_pending): (Vec<PendingRequest>, Vec<PendingRequest>) =
            mem::take(&mut self.entries)
                .into_iter()
                .partition(|entry| admit(&entry.request));
        self.entries = still_pending;
        admitted.into_iter().map(|entry| entry.request).collect()
    }
}
