pub mod chart;
pub mod comparison;
pub mod history;
pub mod palette;
pub mod series;
pub mod settings;
