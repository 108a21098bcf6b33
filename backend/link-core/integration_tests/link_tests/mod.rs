pub mod helpers;

mod end_to_end;
mod receiver;
mod sender;
mod tracker;
