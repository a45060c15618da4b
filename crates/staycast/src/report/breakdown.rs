//! Per-day stay breakdown page.
use maud::{html, Markup, PreEscaped, DOCTYPE};

use crate::narrative::StayBreakdown;

const BREAKDOWN_STYLE: &str = "
body { font-family: 'Times New Roman', Times, serif; max-width: 800px; margin: 0 auto; padding: 20px; }
.description {
    font-size: 18px; font-weight: bold; color: #ffffff; text-align: center;
    margin-bottom: 20px; padding: 10px; border-radius: 10px; border: 1px solid #ffffff;
    background: linear-gradient(135deg, #6a82fb, #fc5c7d);
    box-shadow: 0 8px 16px rgba(0, 0, 0, 0.15);
}
.day-box {
    background: linear-gradient(45deg, #f3ec78, #af4261); color: white;
    padding: 15px; margin-bottom: 10px; border-radius: 10px; transition: transform 0.3s ease;
}
.day-box:hover { transform: translateY(-5px); background: linear-gradient(45deg, #af4261, #f3ec78); }
.day-title { font-weight: bold; font-size: 20px; }
";

/// Render a predicted stay as a standalone HTML page, one box per day.
pub fn render_breakdown_html(breakdown: &StayBreakdown) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { "Hospital Length of Stay Prediction" }
                style { (PreEscaped(BREAKDOWN_STYLE)) }
            }
            body {
                div class="description" {
                    "This page shows a patient's predicted hospital length of stay and an overview "
                    "of what happens on each day, based on the severity of illness."
                }
                h1 { "Hospital Length of Stay Prediction" }
                p class="prediction" {
                    "The predicted length of stay is: "
                    strong { (breakdown.length.days()) " days" }
                    " (severity of illness: " (breakdown.severity) ")"
                }
                h3 { "Breakdown of Each Day's Procedures" }
                @for entry in &breakdown.days {
                    div class="day-box" {
                        p class="day-title" { "Day " (entry.day) ":" }
                        p { (entry.description) }
                    }
                }
            }
        }
    }
}
