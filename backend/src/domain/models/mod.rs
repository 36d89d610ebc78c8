pub mod diary;
pub mod request;
pub mod notification;
