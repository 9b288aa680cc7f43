//! City Builder challenge rules
//!
//! Place green infrastructure on a 4×4 city grid to cut emissions from
//! 100 t to 50 t CO₂ within 30 seconds and a EGP 500,000 budget. Time only
//! moves when the caller invokes [`CityBuilder::tick`].

use serde::{Deserialize, Serialize};
use std::fmt;

pub const INITIAL_CO2: u32 = 100;
pub const TARGET_CO2: u32 = 50;
pub const INITIAL_BUDGET: u64 = 500_000;
pub const INITIAL_TIME_SECS: u32 = 30;
pub const GRID_CELLS: usize = 16;

/// Placeable intervention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolutionKind {
    Solar,
    Water,
    Green,
}

impl SolutionKind {
    pub const ALL: [SolutionKind; 3] = [SolutionKind::Solar, SolutionKind::Water, SolutionKind::Green];

    pub fn name(self) -> &'static str {
        match self {
            SolutionKind::Solar => "Solar Panels",
            SolutionKind::Water => "Water Recycling",
            SolutionKind::Green => "Green Spaces",
        }
    }

    /// EGP
    pub fn cost(self) -> u64 {
        match self {
            SolutionKind::Solar => 80_000,
            SolutionKind::Water => 60_000,
            SolutionKind::Green => 40_000,
        }
    }

    /// t CO₂
    pub fn co2_reduction(self) -> u32 {
        match self {
            SolutionKind::Solar => 15,
            SolutionKind::Water => 10,
            SolutionKind::Green => 8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedSolution {
    pub kind: SolutionKind,
    pub position: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    Ready,
    Playing,
    Paused,
    Over,
}

/// Result of a placement attempt; only `Placed` changes the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceOutcome {
    Placed(PlacedSolution),
    NotPlaying,
    NothingSelected,
    OutOfBounds,
    Occupied,
    InsufficientBudget,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Achievement {
    MissionComplete,
    CarbonCrusher,
    BudgetMaster,
    MasterBuilder,
}

impl Achievement {
    pub fn label(self) -> &'static str {
        match self {
            Achievement::MissionComplete => "🎯 Mission Complete!",
            Achievement::CarbonCrusher => "⭐ Carbon Crusher",
            Achievement::BudgetMaster => "💰 Budget Master",
            Achievement::MasterBuilder => "🏗️ Master Builder",
        }
    }
}

impl fmt::Display for Achievement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityBuilder {
    budget: u64,
    co2: u32,
    time_left: u32,
    state: GameState,
    placed: Vec<PlacedSolution>,
    selected: Option<SolutionKind>,
    achievements: Vec<Achievement>,
}

impl Default for CityBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CityBuilder {
    pub fn new() -> Self {
        Self {
            budget: INITIAL_BUDGET,
            co2: INITIAL_CO2,
            time_left: INITIAL_TIME_SECS,
            state: GameState::Ready,
            placed: Vec::new(),
            selected: None,
            achievements: Vec::new(),
        }
    }

    pub fn budget(&self) -> u64 {
        self.budget
    }

    pub fn co2(&self) -> u32 {
        self.co2
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn placed(&self) -> &[PlacedSolution] {
        &self.placed
    }

    pub fn selected(&self) -> Option<SolutionKind> {
        self.selected
    }

    /// Earned when the game ended; empty before that
    pub fn achievements(&self) -> &[Achievement] {
        &self.achievements
    }

    pub fn reduction_percent(&self) -> f64 {
        (INITIAL_CO2 as f64 - self.co2 as f64) / INITIAL_CO2 as f64 * 100.0
    }

    pub fn target_reached(&self) -> bool {
        self.co2 <= TARGET_CO2
    }

    /// Start or resume; no effect once the game is over
    pub fn start(&mut self) {
        if matches!(self.state, GameState::Ready | GameState::Paused) {
            self.state = GameState::Playing;
        }
    }

    pub fn pause(&mut self) {
        if self.state == GameState::Playing {
            self.state = GameState::Paused;
        }
    }

    /// Pick a solution to place; refused while not playing or unaffordable
    pub fn select(&mut self, kind: SolutionKind) -> bool {
        if self.state != GameState::Playing || self.budget < kind.cost() {
            return false;
        }
        self.selected = Some(kind);
        true
    }

    pub fn place(&mut self, position: usize) -> PlaceOutcome {
        if self.state != GameState::Playing {
            return PlaceOutcome::NotPlaying;
        }
        let Some(kind) = self.selected else {
            return PlaceOutcome::NothingSelected;
        };
        if position >= GRID_CELLS {
            return PlaceOutcome::OutOfBounds;
        }
        if self.placed.iter().any(|p| p.position == position) {
            return PlaceOutcome::Occupied;
        }
        if self.budget < kind.cost() {
            return PlaceOutcome::InsufficientBudget;
        }

        let placed = PlacedSolution { kind, position };
        self.placed.push(placed);
        self.budget -= kind.cost();
        self.co2 = self.co2.saturating_sub(kind.co2_reduction());
        self.selected = None;

        if self.target_reached() {
            self.end();
        }
        PlaceOutcome::Placed(placed)
    }

    /// Advance the clock one second while playing
    pub fn tick(&mut self) {
        if self.state != GameState::Playing {
            return;
        }
        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left == 0 {
            self.end();
        }
    }

    /// Finish the game and award achievements
    pub fn end(&mut self) -> &[Achievement] {
        if self.state != GameState::Over {
            self.state = GameState::Over;
            self.selected = None;
            self.achievements = self.earned_achievements();
            tracing::debug!(
                "City Builder over: {} t CO₂, EGP {} left, {} placements",
                self.co2,
                self.budget,
                self.placed.len()
            );
        }
        &self.achievements
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn earned_achievements(&self) -> Vec<Achievement> {
        let mut earned = Vec::new();
        if self.target_reached() {
            earned.push(Achievement::MissionComplete);
        }
        if self.reduction_percent() >= 60.0 {
            earned.push(Achievement::CarbonCrusher);
        }
        if self.budget as f64 >= INITIAL_BUDGET as f64 * 0.5 {
            earned.push(Achievement::BudgetMaster);
        }
        if self.placed.len() >= 6 {
            earned.push(Achievement::MasterBuilder);
        }
        earned
    }

    /// Game-over headline
    pub fn headline(&self) -> &'static str {
        if self.target_reached() {
            "🎉 Mission Complete!"
        } else {
            "⏰ Time's Up!"
        }
    }

    /// Remaining time as `m:ss`
    pub fn clock(&self) -> String {
        format!("{}:{:02}", self.time_left / 60, self.time_left % 60)
    }
}
