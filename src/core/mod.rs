pub mod ballistics;
pub mod optics;
pub mod plot;
pub mod window;
