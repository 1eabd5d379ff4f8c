pub mod action;
pub mod controller;
