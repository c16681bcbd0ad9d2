//! Terminal rendering of a diagnosis.

use cropcure_core::Diagnosis;
use std::fmt;

const BAR_WIDTH: usize = 30;

fn bar(percent: f32, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f32).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Full report: ranking, confidence chart, summary, info and tip.
struct Report<'a>(&'a Diagnosis);

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let diagnosis = self.0;
        let summary = &diagnosis.summary;
        let name_width = diagnosis
            .predictions
            .iter()
            .map(|p| p.display_name.chars().count())
            .max()
            .unwrap_or(0);

        writeln!(f, "Top {} Predictions", diagnosis.predictions.len())?;
        for p in &diagnosis.predictions {
            writeln!(f, "  #{} → {} — {}%", p.rank, p.display_name, p.confidence)?;
        }

        writeln!(f, "\nConfidence Comparison")?;
        for p in &diagnosis.predictions {
            let pad = name_width - p.display_name.chars().count();
            writeln!(
                f,
                "  {}{} {} {:>6}",
                p.display_name,
                " ".repeat(pad),
                bar(p.confidence.percent(), BAR_WIDTH),
                p.confidence
            )?;
        }

        writeln!(f, "\n{} Prediction: {}", summary.icon, summary.display_name)?;
        writeln!(
            f,
            "  [{}] {}%",
            bar(f32::from(summary.progress), BAR_WIDTH),
            summary.progress
        )?;
        writeln!(f, "  Confidence: {}%", summary.confidence)?;

        writeln!(f, "\nFinal Diagnosis Summary")?;
        writeln!(f, "  Disease:    {}", summary.display_name)?;
        writeln!(f, "  Confidence: {}%", summary.confidence)?;
        writeln!(f, "  Tip:        {}", summary.tip)?;

        writeln!(f, "\nDisease Info\n  {}", summary.description)?;
        writeln!(f, "\nCure Tip\n  {}", summary.tip)?;
        writeln!(f, "\nPrediction time: {}", diagnosis.predicted_at_display())
    }
}

pub fn report(diagnosis: &Diagnosis) -> String {
    Report(diagnosis).to_string()
}
