use agency_models::pagination::PaginationSlice;

#[path = "../common/mod.rs"]
mod common;
mod submission;

pub fn make_slice(limit: u64, offset: u64) -> PaginationSlice {
    PaginationSlice {
        limit: limit.try_into().unwrap(),
        offset,
    }
}
