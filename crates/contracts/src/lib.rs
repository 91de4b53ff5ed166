//! Общие контракты между frontend и backend

pub mod usecases;
