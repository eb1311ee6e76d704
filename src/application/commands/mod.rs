pub mod posts;
pub mod projects;
pub mod tags;

mod retry;
