pub mod credential;
pub mod dispatch;
pub mod generate;
pub mod load;
pub mod open;
pub mod run;
pub mod save;
pub mod schema;
pub mod serve;
