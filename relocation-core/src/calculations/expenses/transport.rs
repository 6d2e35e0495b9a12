use rust_decimal::Decimal;

use super::MonthlyCost;
use super::loan::{amortized_monthly_payment, financed_principal};
use crate::calculations::common::input_amount;
use crate::{TransportExpenses, VehicleFinancing};

impl VehicleFinancing {
    pub fn monthly_payment(&self) -> Decimal {
        match self {
            Self::Outright => Decimal::ZERO,
            Self::Lease { monthly_payment } => input_amount(*monthly_payment),
            Self::Loan {
                price,
                down_payment_percent,
                term_years,
                annual_interest_rate_percent,
            } => amortized_monthly_payment(
                financed_principal(*price, *down_payment_percent),
                input_amount(*annual_interest_rate_percent),
                input_amount(*term_years),
            ),
        }
    }
}

impl TransportExpenses {
    /// Financing, fuel, insurance and maintenance; zero without a vehicle.
    pub fn monthly_vehicle_cost(&self) -> Decimal {
        if !self.owns_vehicle {
            return Decimal::ZERO;
        }
        self.financing.monthly_payment()
            + input_amount(self.monthly_fuel_or_charging)
            + input_amount(self.monthly_insurance)
            + input_amount(self.monthly_maintenance)
    }
}

impl MonthlyCost for TransportExpenses {
    fn monthly_cost(&self) -> Decimal {
        self.monthly_vehicle_cost()
            + input_amount(self.monthly_public_transport_pass)
            + input_amount(self.monthly_ride_share)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn car_owner() -> TransportExpenses {
        TransportExpenses {
            owns_vehicle: true,
            financing: VehicleFinancing::Lease {
                monthly_payment: Some(dec!(300)),
            },
            monthly_fuel_or_charging: Some(dec!(120)),
            monthly_insurance: Some(dec!(60)),
            monthly_maintenance: Some(dec!(20)),
            monthly_public_transport_pass: Some(dec!(40)),
            monthly_ride_share: Some(dec!(25)),
        }
    }

    #[test]
    fn vehicle_costs_count_only_when_owned() {
        let owner = car_owner();
        let non_owner = TransportExpenses {
            owns_vehicle: false,
            ..car_owner()
        };

        assert_eq!(owner.monthly_cost(), dec!(565));
        assert_eq!(non_owner.monthly_cost(), dec!(65));
    }

    #[test]
    fn vehicle_loan_uses_amortized_payment() {
        let financing = VehicleFinancing::Loan {
            price: Some(dec!(30000)),
            down_payment_percent: Some(dec!(20)),
            term_years: Some(dec!(4)),
            annual_interest_rate_percent: Some(dec!(0)),
        };

        assert_eq!(financing.monthly_payment(), dec!(500));
    }

    #[test]
    fn outright_purchase_has_no_payment() {
        assert_eq!(VehicleFinancing::Outright.monthly_payment(), dec!(0));
    }
}
