//! Path-addressed views

use std::fmt;

use crate::program::{DayId, find_day, find_day_by_path};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Overview,
    Day(DayId),
    LogWorkout,
    NotFound,
}

impl Route {
    pub fn parse(path: &str) -> Self {
        // Query and fragment never select a view
        let path = path.split(['?', '#']).next().unwrap_or_default().trim();
        let path = path.trim_end_matches('/');

        match path {
            "" => Route::Overview,
            "/log-workout" => Route::LogWorkout,
            "/upper-body" => Route::Day(DayId::Upper),
            other => find_day_by_path(other)
                .map(|d| Route::Day(d.id))
                .unwrap_or(Route::NotFound),
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Overview => "/",
            Route::Day(id) => find_day(*id).url,
            Route::LogWorkout => "/log-workout",
            Route::NotFound => "/404",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
