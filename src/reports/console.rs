use crate::Result;
use crate::fleet::{ImoNumber, RegistryRecord, ShipRecord, VoyageRecord};
use crate::metrics::{MetricsResult, describe_flag_reason};
use crate::misc::ColorMode;
use chrono::Local;
use core::fmt::{self, Write};
use owo_colors::OwoColorize;
use std::io::{IsTerminal, stdout};
use terminal_size::{Width, terminal_size};

const DEFAULT_TERMINAL_WIDTH: usize = 120;
const SEPARATOR_WIDTH: usize = 40;
const LABEL_WIDTH: usize = 22;

pub fn generate<W: Write>(imo: &ImoNumber, record: &ShipRecord, metrics: &MetricsResult, color: ColorMode, writer: &mut W) -> Result<()> {
    ConsoleReporter::new(writer, color).generate_report(imo, record, metrics)
}

struct ConsoleReporter<'a, W: Write> {
    writer: &'a mut W,
    colors: ColorScheme,
}

impl<'a, W: Write> ConsoleReporter<'a, W> {
    fn new(writer: &'a mut W, color_mode: ColorMode) -> Self {
        Self {
            writer,
            colors: ColorScheme::new(color_mode),
        }
    }

    fn generate_report(&mut self, imo: &ImoNumber, record: &ShipRecord, metrics: &MetricsResult) -> Result<()> {
        self.write_particulars(imo, record)?;
        self.write_separator()?;
        self.write_metrics(record, metrics)?;
        self.write_footer()?;
        Ok(())
    }

    fn write_particulars(&mut self, imo: &ImoNumber, record: &ShipRecord) -> Result<()> {
        self.write_row("Ship", record.name().unwrap_or("-"))?;
        self.write_row("IMO", imo.as_str())?;

        match record {
            ShipRecord::Registry(registry) => self.write_registry_particulars(registry)?,
            ShipRecord::Voyage(voyage) => self.write_voyage_particulars(voyage)?,
        }
        Ok(())
    }

    fn write_registry_particulars(&mut self, record: &RegistryRecord) -> Result<()> {
        self.write_row("Flag", record.flag.as_deref().unwrap_or("-"))?;
        self.write_row("Type", record.ship_type.as_deref().unwrap_or("-"))?;
        self.write_row("Gross Tonnage", &fmt_num(record.gross_tonnage, 0, ""))?;
        self.write_row("Fuel Type", record.fuel_type.as_deref().unwrap_or("-"))?;
        self.write_row("Annual Consumption", &fmt_num(record.annual_fuel_consumption_mt, 0, " t"))?;
        Ok(())
    }

    fn write_voyage_particulars(&mut self, record: &VoyageRecord) -> Result<()> {
        self.write_row("Type (MRV)", record.mrv_ship_type.as_deref().unwrap_or("-"))?;
        self.write_row("Report Year", &record.report_year.map_or_else(|| "-".to_owned(), |y| y.to_string()))?;
        self.write_row("Length", &fmt_num(record.length, 1, " m"))?;
        self.write_row("Width", &fmt_num(record.width, 1, " m"))?;
        self.write_row("Draft (median)", &fmt_num(record.draft_m_median, 1, " m"))?;
        self.write_row("AIS Distance", &fmt_num(record.ais_distance_nm_total, 0, " nm"))?;
        self.write_row("Operating Time", &fmt_num(record.ais_time_hours_total, 1, " h"))?;
        Ok(())
    }

    fn write_metrics(&mut self, record: &ShipRecord, metrics: &MetricsResult) -> Result<()> {
        let intensity_unit = match record {
            ShipRecord::Registry(_) => "gCO2eq/MJ",
            ShipRecord::Voyage(_) => "kg/nm",
        };

        self.write_row("CO2 Emissions (total)", &format!("{:.1} t", metrics.co2_emissions_total))?;

        write!(self.writer, "{:<LABEL_WIDTH$}: ", "GHG Intensity")?;
        self.colors
            .write_by_compliance(self.writer, &format!("{:.2} {intensity_unit}", metrics.intensity_value), metrics.is_compliant)?;
        writeln!(self.writer)?;

        write!(self.writer, "{:<LABEL_WIDTH$}: ", "Compliance")?;
        let status = if metrics.is_compliant { "COMPLIANT" } else { "NOT COMPLIANT" };
        self.colors.write_by_compliance(self.writer, status, metrics.is_compliant)?;
        writeln!(self.writer)?;

        self.write_row("Estimated Penalty", &format!("EUR {:.2}", metrics.penalty_estimate))?;

        if let Some(residual) = metrics.residual_amount {
            self.write_row("Deviation (absolute)", &format!("{residual:.2} kg"))?;
        }
        if let Some(percent) = metrics.residual_percent {
            self.write_row("Deviation (relative)", &format!("{percent:.1} %"))?;
        }
        if let Some(reason) = &metrics.flag_reason {
            self.write_row("Assessment", &describe_flag_reason(reason))?;
        }
        Ok(())
    }

    fn write_footer(&mut self) -> Result<()> {
        writeln!(self.writer)?;
        let timestamp = Local::now().format("%B %d, %Y at %H:%M");
        self.colors.write_dimmed(self.writer, &format!("Generated on {timestamp}"))?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_row(&mut self, label: &str, value: &str) -> Result<()> {
        writeln!(self.writer, "{label:<LABEL_WIDTH$}: {value}")?;
        Ok(())
    }

    fn write_separator(&mut self) -> Result<()> {
        writeln!(self.writer)?;
        let width = SEPARATOR_WIDTH.min(detect_terminal_width());
        self.colors.write_dimmed(self.writer, &"─".repeat(width))?;
        writeln!(self.writer)?;
        writeln!(self.writer)?;
        Ok(())
    }
}

struct ColorScheme {
    enabled: bool,
}

impl ColorScheme {
    fn new(color_mode: ColorMode) -> Self {
        let enabled = matches!(color_mode, ColorMode::Always) || (matches!(color_mode, ColorMode::Auto) && stdout().is_terminal());
        Self { enabled }
    }

    fn write_by_compliance<W: Write>(&self, writer: &mut W, text: &str, is_compliant: bool) -> fmt::Result {
        if !self.enabled {
            return write!(writer, "{text}");
        }
        if is_compliant {
            write!(writer, "{}", text.green())
        } else {
            write!(writer, "{}", text.red())
        }
    }

    fn write_dimmed<W: Write>(&self, writer: &mut W, text: &str) -> fmt::Result {
        if self.enabled {
            write!(writer, "{}", text.dimmed())
        } else {
            write!(writer, "{text}")
        }
    }
}

fn fmt_num(value: Option<f64>, decimals: usize, unit: &str) -> String {
    value.map_or_else(|| "-".to_owned(), |v| format!("{v:.decimals$}{unit}"))
}

fn detect_terminal_width() -> usize {
    if stdout().is_terminal() {
        terminal_size().map_or(DEFAULT_TERMINAL_WIDTH, |(Width(w), _)| usize::from(w))
    } else {
        DEFAULT_TERMINAL_WIDTH
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::fleet::{MemoryStore, resolve};
    use crate::metrics::assess;

    fn render(imo: &str) -> String {
        let store = MemoryStore::builtin().unwrap();
        let imo = ImoNumber::parse(imo).unwrap();
        let record = resolve(&store, &imo).unwrap().into_result().unwrap();
        let metrics = assess(&record, &Config::default());

        let mut output = String::new();
        generate(&imo, &record, &metrics, ColorMode::Never, &mut output).unwrap();
        output
    }

    #[test]
    fn test_registry_report_content() {
        let output = render("9876543");

        assert!(output.contains("MS Atlantic Explorer"));
        assert!(output.contains("9876543"));
        assert!(output.contains("3736.8 t"));
        assert!(output.contains("100.00 gCO2eq/MJ"));
        assert!(output.contains("NOT COMPLIANT"));
        assert!(output.contains("EUR 25680.00"));
        // registry records carry no residuals
        assert!(!output.contains("Deviation"));
    }

    #[test]
    fn test_voyage_report_content() {
        let output = render("1014618");

        assert!(output.contains("MV Coral Meridian"));
        assert!(output.contains("kg/nm"));
        assert!(output.contains("NOT COMPLIANT"));
        assert!(output.contains("Deviation (relative)"));
        assert!(output.contains("Relative deviation exceeds 30% threshold"));
    }

    #[test]
    fn test_compliant_voyage_has_no_remark() {
        let output = render("9347126");

        assert!(output.contains("MS Baltic Crown"));
        assert!(output.contains(": COMPLIANT"));
        assert!(!output.contains("Assessment"));
    }
}
