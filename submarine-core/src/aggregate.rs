use crate::domain::{Cycle, Subscription};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Totals {
    pub monthly: f64,
    pub yearly: f64,
}

impl Cycle {
    pub fn monthly_cost(self, price: f64) -> f64 {
        match self {
            Cycle::Monthly => price,
            Cycle::Yearly => price / 12.0,
        }
    }

    pub fn yearly_cost(self, price: f64) -> f64 {
        match self {
            Cycle::Monthly => price * 12.0,
            Cycle::Yearly => price,
        }
    }
}

impl Subscription {
    pub fn monthly_cost(&self) -> f64 {
        self.cycle.monthly_cost(self.price)
    }

    pub fn yearly_cost(&self) -> f64 {
        self.cycle.yearly_cost(self.price)
    }
}

/// Sum normalised costs. Nothing is rounded here; see [`format_money`].
pub fn totals(subs: &[Subscription]) -> Totals {
    subs.iter().fold(Totals::default(), |acc, s| Totals {
        monthly: acc.monthly + s.monthly_cost(),
        yearly: acc.yearly + s.yearly_cost(),
    })
}

pub fn format_money(amount: f64) -> String {
    format!("${amount:.2}")
}

/// One-line cost summary used by list views, e.g. `$120.00 Yearly ($10.00/mo, $120.00/yr)`.
pub fn cost_line(sub: &Subscription) -> String {
    format!(
        "{} {} ({}/mo, {}/yr)",
        format_money(sub.price),
        sub.cycle,
        format_money(sub.monthly_cost()),
        format_money(sub.yearly_cost())
    )
}
