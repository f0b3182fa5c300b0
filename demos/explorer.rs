//! Interactive quality loss explorer on the console.
//!
//! Drives the explorer with scripted slider moves, then prints the
//! sum-of-squares decomposition of each reference dataset.

use std::collections::HashMap;

use taguchi_loss::datasets::{list_datasets, reference_set};
use taguchi_loss::explorer::{CharacteristicTabs, Field, LossExplorer, LossView, ParameterSource};
use taguchi_loss::{EngineConfig, Error, LossCurve, QualityLossEngine};

struct FormInputs(HashMap<Field, String>);

impl ParameterSource for FormInputs {
    fn read(&self, field: Field) -> String {
        self.0.get(&field).cloned().unwrap_or_default()
    }
}

struct ConsoleView;

impl LossView for ConsoleView {
    fn show_loss(&mut self, text: &str) {
        println!("  Loss: {text}");
    }

    fn show_observed(&mut self, x: f64) {
        println!("  Observed value: {x}");
    }

    fn render_curve(&mut self, curve: &LossCurve, marker: (f64, f64)) {
        let peak = curve.max_loss().unwrap_or(0.0);
        println!(
            "  Curve: {} points over [{:.2}, {:.2}], peak {:.2}, marker ({:.2}, {:.2})",
            curve.len(),
            curve.xs()[0],
            curve.xs()[curve.len() - 1],
            peak,
            marker.0,
            marker.1
        );
    }

    fn show_error(&mut self, error: &Error) {
        println!("  Error: {error} (previous chart kept)");
    }
}

fn main() {
    println!("Taguchi Quality Loss Explorer\n");

    let inputs = FormInputs(HashMap::from([
        (Field::Target, "10".to_string()),
        (Field::SpecLimit, "10.5".to_string()),
        (Field::CostAtLimit, "20".to_string()),
        (Field::Observed, "10".to_string()),
    ]));
    let mut explorer = LossExplorer::new(
        QualityLossEngine::new(EngineConfig::default()),
        inputs,
        ConsoleView,
    );

    for observed in ["10", "10.25", "10.5", "abc", "9.6"] {
        println!("Slider -> {observed}");
        explorer
            .source_mut()
            .0
            .insert(Field::Observed, observed.to_string());
        // The view has already printed the error and kept the last chart.
        if explorer.refresh().is_err() {
            println!("  (input ignored)");
        }
    }

    if let Some((left, right)) = explorer.observed_range() {
        println!("\nSlider range: [{left}, {right}]");
    }

    println!("\nSum-of-squares decomposition");
    let engine = explorer.engine().clone();
    let mut tabs = CharacteristicTabs::new();
    for name in list_datasets() {
        let kind = match tabs.activate(name) {
            Ok(kind) => kind,
            Err(err) => {
                println!("  {err}");
                continue;
            }
        };
        let set = reference_set(kind);
        match engine.decompose(kind, &set) {
            Ok(ss) => println!("  {kind}: {ss}"),
            Err(err) => println!("  {kind}: {err}"),
        }
    }
}
