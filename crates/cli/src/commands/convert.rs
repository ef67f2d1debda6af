//! The convert command: detect, ask, plan, convert, report.

use std::io::{BufRead, Write};

use anyhow::Result;
use fontshelf_core::{
    ConversionReport, Converter, SuffixDecisions, WeightLabel, build_plans, families,
    parse_all, plan::ConversionPlan, suffix_candidates,
};

use crate::{app::App, prompt::Console};

/// Answers that replace prompts when given up front.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Use numeric weight labels without asking.
    pub numeric: bool,
    /// Families whose shared suffix is kept without asking.
    pub keep_suffix: Vec<String>,
    /// Take the default for every question that would otherwise be asked.
    pub assume_defaults: bool,
    /// Print the plan instead of converting.
    pub dry_run: bool,
}

/// Run one conversion. Returns `None` when nothing was converted (no inputs
/// or a dry run).
pub fn convert<R: BufRead, W: Write>(
    app: &App,
    console: &mut Console<R, W>,
    options: &ConvertOptions,
) -> Result<Option<ConversionReport>> {
    app.layout.ensure()?;

    let names = app.layout.input_names()?;
    if names.is_empty() {
        console.say("\nNo .ttf files found in fonts_ttf.")?;
        return Ok(None);
    }

    let fonts = parse_all(&names);
    console.say(format!("\nDetected families: {}", families(&fonts).join(" | ")))?;

    let numeric = options.numeric
        || (!options.assume_defaults
            && console.ask_yes_no(
                "Prefer numeric weight labels (900) instead of text (Black)?",
                false,
            )?);

    let mut decisions = SuffixDecisions::keep_for(options.keep_suffix.iter().cloned());
    for candidate in suffix_candidates(&fonts) {
        if options.keep_suffix.contains(&candidate.family) || options.assume_defaults {
            continue;
        }
        let drop = console.ask_yes_no(
            &format!("Remove suffix '_{}' from family {}?", candidate.suffix, candidate.family),
            true,
        )?;
        decisions.set(candidate.family, drop);
    }

    let plans = build_plans(&fonts, WeightLabel::from_numeric(numeric), &decisions);
    if options.dry_run {
        print_plan(console, &plans)?;
        return Ok(None);
    }

    let mut converter = Converter::new(app.transform.as_ref());
    if let Some(jobs) = app.jobs {
        converter = converter.with_jobs(jobs);
    }
    let report = converter.convert(&app.layout, &plans)?;
    print_report(console, &report)?;
    Ok(Some(report))
}

fn print_plan<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    plans: &[ConversionPlan],
) -> Result<()> {
    console.say("\nPlanned conversions:")?;
    for plan in plans {
        console.say(format!(
            "- {} -> {}/{}.woff2",
            plan.source_name, plan.family, plan.output_name
        ))?;
    }
    Ok(())
}

fn file_name(path: &std::path::Path) -> String {
    path.file_name().unwrap_or_default().to_string_lossy().into_owned()
}

/// List generated files and failures with their reasons.
pub fn print_report<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    report: &ConversionReport,
) -> Result<()> {
    if !report.successes.is_empty() {
        console.say("\nFiles generated in font_lib:")?;
        for path in &report.successes {
            console.say(format!("- {}", file_name(path)))?;
        }
    }
    if !report.failures.is_empty() {
        console.say("\nConversion failures:")?;
        for failure in &report.failures {
            console.say(format!("- {}: {}", file_name(&failure.source), failure.error))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{fs::write, path::Path};

    use fontshelf_core::{DirectoryLayout, FontTransform};
    use tempfile::{TempDir, tempdir};

    struct Touch;

    impl FontTransform for Touch {
        fn transform(&self, _source: &Path, target: &Path) -> Result<()> {
            write(target, b"wOF2")?;
            Ok(())
        }
    }

    fn app_with(inputs: &[&str]) -> (TempDir, App) {
        let dir = tempdir().unwrap();
        let layout = DirectoryLayout::create(dir.path()).unwrap();
        for name in inputs {
            write(layout.input_dir.join(name), b"x").unwrap();
        }
        (dir, App::new(layout, Box::new(Touch)).with_jobs(Some(2)))
    }

    fn run(app: &App, script: &str, options: &ConvertOptions) -> (Option<ConversionReport>, String) {
        let mut console = Console::new(script.as_bytes(), Vec::new());
        let report = convert(app, &mut console, options).unwrap();
        (report, String::from_utf8(console.into_output()).unwrap())
    }

    #[test]
    fn test_dry_run_prints_plan_and_touches_nothing() {
        let (_dir, app) = app_with(&["Inter_Display-Bold.ttf", "Inter_Display-BoldItalic.ttf"]);
        let options = ConvertOptions { assume_defaults: true, dry_run: true, ..Default::default() };

        let (report, output) = run(&app, "", &options);

        assert!(report.is_none());
        assert!(output.contains("- Inter_Display-Bold.ttf -> Inter/Inter-Bold.woff2"));
        assert!(output.contains("- Inter_Display-BoldItalic.ttf -> Inter/Inter-BoldItalic.woff2"));
        assert!(!output.contains("[Y/n]"));
        assert!(app.layout.input_dir.join("Inter_Display-Bold.ttf").exists());
    }

    #[test]
    fn test_keep_suffix_skips_question() {
        let (_dir, app) = app_with(&["Inter_Display-Bold.ttf", "Roboto_Flex-Bold.ttf"]);
        let options = ConvertOptions {
            numeric: true,
            keep_suffix: vec!["Inter".into()],
            ..Default::default()
        };

        // Only Roboto is asked about; answer no.
        let (report, output) = run(&app, "n\n", &options);

        let report = report.unwrap();
        assert!(report.all_succeeded());
        assert!(!output.contains("Prefer numeric"));
        assert!(!output.contains("family Inter?"));
        assert!(output.contains("Remove suffix '_Flex' from family Roboto?"));
        assert!(output.contains("- Inter-700_Display.woff2"));
        assert!(output.contains("- Roboto-700_Flex.woff2"));
    }

    #[test]
    fn test_failures_are_listed() {
        struct Refuse;
        impl FontTransform for Refuse {
            fn transform(&self, _source: &Path, _target: &Path) -> Result<()> {
                anyhow::bail!("no glyphs in range")
            }
        }

        let (_dir, app) = app_with(&["Lora-Bold.ttf"]);
        let app = App::new(app.layout, Box::new(Refuse));
        let options = ConvertOptions { assume_defaults: true, ..Default::default() };

        let (report, output) = run(&app, "", &options);

        assert_eq!(report.unwrap().failures.len(), 1);
        assert!(output.contains("Conversion failures:\n- Lora-Bold.ttf: no glyphs in range"));
        assert!(!output.contains("Files generated"));
    }
}
