pub mod company;
pub mod grant;
pub mod report;
