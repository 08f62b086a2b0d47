// 指令 session：以文字指令取代視窗的選單與滑鼠操作
pub mod session;

pub use session::{Command, CommandOutcome, Session};
