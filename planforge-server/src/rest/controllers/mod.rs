pub mod projects;

pub use projects::ProjectsController;
