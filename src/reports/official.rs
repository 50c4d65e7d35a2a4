//! Official P&L statement
//!
//! Built straight from [`OfficialFigures`], independent of the ledger, so it
//! can serve as a reference for ledger-derived totals.

use serde::{Deserialize, Serialize};

use crate::models::{Category, Money, OfficialFigures};

/// The official profit and loss statement for one year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfficialSummary {
    pub year: i32,
    pub sales: Money,
    pub cogs: Money,
    /// Sales minus cost of goods sold
    pub gross_profit: Money,
    pub labour: Money,
    pub rent: Money,
    pub transport: Money,
    pub transaction_costs: Money,
    pub total_operating_expenses: Money,
    /// Gross profit minus operating expenses
    pub net_profit: Money,
    /// Percent of sales, 0 when sales is 0
    pub gross_profit_margin: f64,
    pub net_profit_margin: f64,
}

/// How a waterfall bar is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Measure {
    /// Starts from zero
    Absolute,
    /// Moves the running total
    Relative,
    /// Shows the running total
    Total,
}

/// One bar of the P&L waterfall
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaterfallStep {
    pub label: String,
    pub measure: Measure,
    /// Signed; costs are negative
    pub value: Money,
}

/// A named expense line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseLine {
    pub label: String,
    pub amount: Money,
}

impl OfficialSummary {
    pub fn from_figures(figures: &OfficialFigures) -> Self {
        let gross_profit = figures.sales - figures.cogs;
        let total_operating_expenses: Money = figures
            .operating_expenses()
            .iter()
            .map(|(_, amount)| *amount)
            .sum();
        let net_profit = gross_profit - total_operating_expenses;

        Self {
            year: figures.year,
            sales: figures.sales,
            cogs: figures.cogs,
            gross_profit,
            labour: figures.labour,
            rent: figures.rent,
            transport: figures.transport,
            transaction_costs: figures.transaction_costs,
            total_operating_expenses,
            net_profit,
            gross_profit_margin: gross_profit.percent_of(figures.sales),
            net_profit_margin: net_profit.percent_of(figures.sales),
        }
    }

    /// Cost of goods sold plus operating expenses
    pub fn total_expenses(&self) -> Money {
        self.cogs + self.total_operating_expenses
    }

    fn cost_lines(&self) -> [(&'static str, Money); 5] {
        [
            ("Cost of Goods Sold", self.cogs),
            (Category::Labour.label(), self.labour),
            (Category::Rent.label(), self.rent),
            (Category::Transport.label(), self.transport),
            (Category::TransactionCosts.label(), self.transaction_costs),
        ]
    }

    /// Sales, then each cost as a negative step, then the net profit total
    pub fn waterfall(&self) -> Vec<WaterfallStep> {
        let mut steps = Vec::with_capacity(7);
        steps.push(WaterfallStep {
            label: Category::Sales.label().to_string(),
            measure: Measure::Absolute,
            value: self.sales,
        });
        steps.extend(self.cost_lines().into_iter().map(|(label, amount)| WaterfallStep {
            label: label.to_string(),
            measure: Measure::Relative,
            value: -amount,
        }));
        steps.push(WaterfallStep {
            label: "Net Profit".to_string(),
            measure: Measure::Total,
            value: self.net_profit,
        });
        steps
    }

    /// Every cost line, for the expense pie
    pub fn expense_breakdown(&self) -> Vec<ExpenseLine> {
        self.cost_lines()
            .into_iter()
            .map(|(label, amount)| ExpenseLine {
                label: label.to_string(),
                amount,
            })
            .collect()
    }

    /// Format the statement for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();
        let line = |label: &str, amount: Money| {
            format!("{:<32} {:>26}\n", label, amount.format_with_symbol(currency))
        };

        output.push_str(&format!("Official P&L Statement {}\n", self.year));
        output.push_str(&"=".repeat(60));
        output.push('\n');
        output.push_str(&line("Sales Revenue", self.sales));
        output.push_str(&line("Cost of Goods Sold", self.cogs));
        output.push_str(&"-".repeat(60));
        output.push('\n');
        output.push_str(&line("GROSS PROFIT", self.gross_profit));
        output.push_str(&format!(
            "{:<32} {:>25.1}%\n",
            "Gross Margin", self.gross_profit_margin
        ));
        output.push('\n');
        output.push_str("Operating Expenses\n");
        for (label, amount) in self.cost_lines().into_iter().skip(1) {
            output.push_str(&line(&format!("  {}", label), amount));
        }
        output.push_str(&line("Total Operating Expenses", self.total_operating_expenses));
        output.push_str(&"-".repeat(60));
        output.push('\n');
        output.push_str(&line("NET PROFIT", self.net_profit));
        output.push_str(&format!(
            "{:<32} {:>25.1}%\n",
            "Net Margin", self.net_profit_margin
        ));

        output
    }
}

/// Dashboard headline numbers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeyMetrics {
    pub net_profit: Money,
    pub net_margin: f64,
    pub gross_margin: f64,
    pub total_revenue: Money,
    /// Operating expenses plus cost of goods sold
    pub total_expenses: Money,
}

impl From<&OfficialSummary> for KeyMetrics {
    fn from(summary: &OfficialSummary) -> Self {
        Self {
            net_profit: summary.net_profit,
            net_margin: summary.net_profit_margin,
            gross_margin: summary.gross_profit_margin,
            total_revenue: summary.sales,
            total_expenses: summary.total_expenses(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fy2024() -> OfficialSummary {
        OfficialSummary::from_figures(&OfficialFigures::FY2024)
    }

    #[test]
    fn test_fy2024_statement() {
        let summary = fy2024();

        assert_eq!(summary.gross_profit, Money::from_units(5_374_558));
        assert_eq!(summary.total_operating_expenses, Money::from_cents(198_548_265));
        assert_eq!(summary.net_profit, Money::from_cents(338_907_535));
        assert!((summary.gross_profit_margin - 23.76).abs() < 0.01);
        assert!((summary.net_profit_margin - 14.98).abs() < 0.01);
    }

    #[test]
    fn test_zero_sales_margins() {
        let figures = OfficialFigures {
            sales: Money::zero(),
            ..OfficialFigures::FY2024
        };
        let summary = OfficialSummary::from_figures(&figures);
        assert_eq!(summary.gross_profit_margin, 0.0);
        assert_eq!(summary.net_profit_margin, 0.0);
        assert!(summary.net_profit.is_negative());
    }

    #[test]
    fn test_waterfall_sums_to_net_profit() {
        let summary = fy2024();
        let steps = summary.waterfall();

        assert_eq!(steps.len(), 7);
        assert_eq!(steps[0].measure, Measure::Absolute);
        assert_eq!(steps[6].measure, Measure::Total);
        assert!(steps[1..6].iter().all(|s| s.value.is_negative()));

        let running: Money = steps[..6].iter().map(|s| s.value).sum();
        assert_eq!(running, steps[6].value);
    }

    #[test]
    fn test_expense_breakdown() {
        let lines = fy2024().expense_breakdown();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0].label, "Cost of Goods Sold");
        assert_eq!(lines[4].label, "Transaction Costs");

        let total: Money = lines.iter().map(|l| l.amount).sum();
        assert_eq!(total, fy2024().total_expenses());
    }

    #[test]
    fn test_key_metrics() {
        let summary = fy2024();
        let metrics = KeyMetrics::from(&summary);
        assert_eq!(metrics.net_profit, summary.net_profit);
        assert_eq!(metrics.total_revenue, Money::from_units(22_619_122));
        assert_eq!(metrics.total_expenses, summary.sales - summary.net_profit);
    }

    #[test]
    fn test_format_terminal() {
        let output = fy2024().format_terminal("KES ");
        assert!(output.contains("Official P&L Statement 2024"));
        assert!(output.contains("KES 3,389,075.35"));
        assert!(output.contains("14.98") || output.contains("15.0%"));
    }
}
