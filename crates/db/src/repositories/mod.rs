pub mod image_repo;
pub mod job_repo;

pub use image_repo::ImageRepo;
pub use job_repo::JobRepo;
