mod course;
mod episode;
mod store;

pub use course::Course;
pub use episode::Episode;
pub use store::{CourseStore, episode_key};
