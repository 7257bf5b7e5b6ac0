mod check_config;
mod health;
mod login;
mod shell;
mod sign_in;
mod sign_out;
mod submit_form;

pub use self::{
    check_config::*, health::*, login::*, shell::*, sign_in::*, sign_out::*, submit_form::*,
};
