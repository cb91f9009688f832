//! Console output formatter for intake results

use colored::Colorize;
use nyay_domain::{
    DetailedAnalysis, InitialAnalysis, ResolutionPath, Theme, UiSettings, UrgencyLevel, translate,
};

/// Steps shown in the e-filing guide for the self-file path
const EFILING_STEPS: &[&str] = &[
    "Register on the e-Daakhil portal (edaakhil.nic.in)",
    "Draft the complaint: parties, facts, relief sought, and claim amount",
    "Upload supporting documents (invoice, correspondence, helpline complaint id if any)",
    "Pay the court fee online as per the claim amount",
    "Track the case status on the portal and attend hearings as notified",
];

/// Formats analysis results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the initial analysis, including the consumer-path section.
    ///
    /// Exactly one of the e-filing guide or the lawyer call-to-action is
    /// rendered, and only when a resolution path was chosen.
    pub fn format_initial(
        analysis: &InitialAnalysis,
        path: Option<ResolutionPath>,
        settings: &UiSettings,
    ) -> String {
        let lang = settings.language;
        let mut output = String::new();

        output.push_str(&Self::header(translate(lang, "initial_report"), settings));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n",
            Self::label(translate(lang, "case_type"), settings),
            analysis.case_type
        ));
        output.push_str(&format!(
            "{} {}\n",
            Self::label(translate(lang, "urgency"), settings),
            Self::urgency_badge(analysis.urgency_level)
        ));
        output.push_str(&format!(
            "{} {}\n\n",
            Self::label(translate(lang, "timeframe"), settings),
            analysis.estimated_timeframe
        ));

        output.push_str(&format!(
            "{}\n{}\n",
            Self::label(translate(lang, "summary"), settings),
            analysis.summary
        ));

        if analysis.requires_fir {
            output.push_str(&format!(
                "\n{}\n",
                translate(lang, "fir_notice").red().bold()
            ));
        }

        Self::push_list(
            &mut output,
            translate(lang, "prerequisites"),
            &analysis.prerequisites,
            settings,
        );
        Self::push_list(
            &mut output,
            translate(lang, "recommendations"),
            &analysis.recommendations,
            settings,
        );
        Self::push_list(
            &mut output,
            translate(lang, "next_steps"),
            &analysis.next_steps,
            settings,
        );

        match path {
            Some(ResolutionPath::SelfFile) => {
                output.push_str(&Self::section_header(
                    translate(lang, "efiling_guide"),
                    settings,
                ));
                for (i, step) in EFILING_STEPS.iter().enumerate() {
                    output.push_str(&format!("  {}. {}\n", i + 1, step));
                }
            }
            Some(ResolutionPath::LawyerAssisted) => {
                output.push_str(&format!(
                    "\n{}\n",
                    translate(lang, "lawyer_cta").green().bold()
                ));
            }
            None => {}
        }

        output.push_str(&Self::footer(settings));
        output
    }

    /// Format the detailed report.
    pub fn format_detailed(report: &DetailedAnalysis, settings: &UiSettings) -> String {
        let lang = settings.language;
        let mut output = String::new();

        output.push_str(&Self::header(translate(lang, "detailed_report"), settings));
        output.push('\n');

        output.push_str(&format!("{}\n\n", report.case_title.bold()));
        output.push_str(&format!("{}\n", report.executive_summary));

        output.push_str(&Self::section_header(translate(lang, "authority"), settings));
        output.push_str(&format!("  {}\n", report.authority.primary_authority));
        if !report.authority.jurisdiction.is_empty() {
            output.push_str(&format!("  {}\n", report.authority.jurisdiction));
        }
        if !report.authority.filing_mechanism.is_empty() {
            output.push_str(&format!("  {}\n", report.authority.filing_mechanism));
        }

        if !report.legal_provisions.is_empty() {
            output.push_str(&Self::section_header(
                translate(lang, "legal_provisions"),
                settings,
            ));
            for provision in &report.legal_provisions {
                output.push_str(&format!(
                    "  * {} {} - {}\n",
                    provision.statute.bold(),
                    provision.section,
                    provision.relevance
                ));
            }
        }

        if !report.action_plan.is_empty() {
            output.push_str(&Self::section_header(
                translate(lang, "action_plan"),
                settings,
            ));
            for step in &report.action_plan {
                output.push_str(&format!("  {}. {}\n", step.order, step.action.bold()));
                if !step.detail.is_empty() {
                    output.push_str(&format!("     {}\n", step.detail));
                }
            }
        }

        output.push_str(&format!(
            "\n{} {}\n",
            Self::label(translate(lang, "timeline"), settings),
            report.timeline_estimate
        ));
        output.push_str(&format!(
            "{} {}\n",
            Self::label(translate(lang, "cost"), settings),
            report.cost_estimate
        ));

        Self::push_list(
            &mut output,
            translate(lang, "success_factors"),
            &report.success_factors,
            settings,
        );

        output.push_str(&format!(
            "\n{}\n{}\n",
            Self::label(translate(lang, "assessment"), settings),
            report.final_assessment
        ));

        output.push_str(&Self::footer(settings));
        output
    }

    /// Case type, summary and next steps only (concise output)
    pub fn format_initial_summary(analysis: &InitialAnalysis, settings: &UiSettings) -> String {
        let lang = settings.language;
        let mut output = String::new();
        output.push_str(&format!(
            "{} {}\n\n{}\n",
            Self::label(translate(lang, "case_type"), settings),
            analysis.case_type,
            analysis.summary
        ));
        Self::push_list(
            &mut output,
            translate(lang, "next_steps"),
            &analysis.next_steps,
            settings,
        );
        output
    }

    /// Format any serializable result as JSON
    pub fn format_json<T: serde::Serialize>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }

    fn urgency_badge(level: UrgencyLevel) -> String {
        match level {
            UrgencyLevel::Low => level.display_name().green().to_string(),
            UrgencyLevel::Medium => level.display_name().yellow().to_string(),
            UrgencyLevel::High => level.display_name().red().bold().to_string(),
        }
    }

    fn push_list(output: &mut String, title: &str, items: &[String], settings: &UiSettings) {
        if items.is_empty() {
            return;
        }
        output.push_str(&Self::section_header(title, settings));
        for item in items {
            output.push_str(&format!("  * {}\n", item));
        }
    }

    fn accent(text: &str, settings: &UiSettings) -> colored::ColoredString {
        match settings.theme {
            Theme::Light => text.blue(),
            Theme::Dark => text.cyan(),
        }
    }

    fn label(text: &str, settings: &UiSettings) -> String {
        format!("{}:", Self::accent(text, settings).bold())
    }

    fn header(title: &str, settings: &UiSettings) -> String {
        let line = "=".repeat(60);
        format!(
            "{}\n{:^60}\n{}",
            Self::accent(&line, settings),
            title.bold(),
            Self::accent(&line, settings)
        )
    }

    fn section_header(title: &str, settings: &UiSettings) -> String {
        format!(
            "\n{}\n{}\n",
            Self::accent(title, settings).bold(),
            "-".repeat(40)
        )
    }

    fn footer(settings: &UiSettings) -> String {
        format!("\n{}\n", Self::accent(&"=".repeat(60), settings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nyay_domain::{ActionStep, AuthorityMapping, Language};

    fn consumer_analysis() -> InitialAnalysis {
        InitialAnalysis {
            case_type: "Consumer Dispute".to_string(),
            summary: "Airline refused a refund for a cancelled flight.".to_string(),
            is_consumer_case: true,
            next_steps: vec!["Gather booking documents".to_string()],
            ..InitialAnalysis::fallback()
        }
    }

    #[test]
    fn test_lawyer_path_shows_cta_and_no_guide() {
        let output = ConsoleFormatter::format_initial(
            &consumer_analysis(),
            Some(ResolutionPath::LawyerAssisted),
            &UiSettings::default(),
        );
        assert!(output.contains("Connect with a verified lawyer"));
        assert!(!output.contains("e-Daakhil"));
    }

    #[test]
    fn test_self_file_path_shows_guide_and_no_cta() {
        let output = ConsoleFormatter::format_initial(
            &consumer_analysis(),
            Some(ResolutionPath::SelfFile),
            &UiSettings::default(),
        );
        assert!(output.contains("e-Daakhil"));
        assert!(!output.contains("Connect with a verified lawyer"));
    }

    #[test]
    fn test_no_path_shows_neither() {
        let output = ConsoleFormatter::format_initial(
            &consumer_analysis(),
            None,
            &UiSettings::default(),
        );
        assert!(!output.contains("e-Daakhil"));
        assert!(!output.contains("Connect with a verified lawyer"));
    }

    #[test]
    fn test_fir_notice_renders_when_required() {
        let mut analysis = consumer_analysis();
        analysis.requires_fir = true;
        let output =
            ConsoleFormatter::format_initial(&analysis, None, &UiSettings::default());
        assert!(output.contains("FIR"));
    }

    #[test]
    fn test_hindi_labels() {
        let settings = UiSettings {
            language: Language::Hi,
            ..Default::default()
        };
        let output = ConsoleFormatter::format_initial(&consumer_analysis(), None, &settings);
        assert!(output.contains("सारांश"));
    }

    #[test]
    fn test_detailed_report_sections() {
        let report = DetailedAnalysis {
            case_title: "Airline Refund Dispute".to_string(),
            executive_summary: "Strong consumer claim.".to_string(),
            authority: AuthorityMapping {
                primary_authority: "District Consumer Commission".to_string(),
                jurisdiction: "Claim below Rs 50 lakh".to_string(),
                filing_mechanism: "e-Daakhil portal".to_string(),
            },
            action_plan: vec![ActionStep {
                order: 1,
                action: "Send a legal notice".to_string(),
                detail: "Give the airline 15 days to respond.".to_string(),
            }],
            ..Default::default()
        };
        let output = ConsoleFormatter::format_detailed(&report, &UiSettings::default());
        assert!(output.contains("Airline Refund Dispute"));
        assert!(output.contains("District Consumer Commission"));
        assert!(output.contains("Send a legal notice"));
    }

    #[test]
    fn test_json_output_is_valid() {
        let output = ConsoleFormatter::format_json(&consumer_analysis());
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["caseType"], "Consumer Dispute");
    }
}
