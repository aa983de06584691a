//! Nómina predefinida
//!
//! Doce pasajeros de demostración para poblar la terminal sin capturar
//! datos a mano. Las entradas se repiten intactas entre arranques; el
//! motor descarta las que ya están en el sistema por nombre y destino.

use crate::models::passenger::{FareCategory, PassengerDraft, PaymentMethod};

/// Entrada fija de la nómina de demostración.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RosterEntry {
    pub name: &'static str,
    pub destination: &'static str,
    pub category: FareCategory,
    pub payment_method: PaymentMethod,
    pub amount_paid: &'static str,
}

impl RosterEntry {
    pub fn draft(&self) -> PassengerDraft {
        PassengerDraft {
            name: self.name.to_string(),
            destination: self.destination.to_string(),
            category: self.category,
            payment_method: self.payment_method,
            amount_paid: self.amount_paid.to_string(),
        }
    }
}

/// Nómina completa. Algunos montos quedan cortos a propósito (Sarah
/// Williams, Jennifer Anderson) para ejercitar la denegación de pago.
pub const PREDEFINED_ROSTER: [RosterEntry; 12] = [
    RosterEntry {
        name: "John Smith",
        destination: "Downtown",
        category: FareCategory::Standard,
        payment_method: PaymentMethod::Cash,
        amount_paid: "50.00",
    },
    RosterEntry {
        name: "Maria Garcia",
        destination: "Airport",
        category: FareCategory::Vip,
        payment_method: PaymentMethod::Cash,
        amount_paid: "120.00",
    },
    RosterEntry {
        name: "David Johnson",
        destination: "University",
        category: FareCategory::Discounted,
        payment_method: PaymentMethod::Cash,
        amount_paid: "35.00",
    },
    RosterEntry {
        name: "Sarah Williams",
        destination: "Shopping Mall",
        category: FareCategory::Standard,
        payment_method: PaymentMethod::Cash,
        amount_paid: "45.00",
    },
    RosterEntry {
        name: "Michael Brown",
        destination: "Hospital",
        category: FareCategory::Vip,
        payment_method: PaymentMethod::Cash,
        amount_paid: "150.00",
    },
    RosterEntry {
        name: "Emily Davis",
        destination: "Beach",
        category: FareCategory::Standard,
        payment_method: PaymentMethod::Cash,
        amount_paid: "60.00",
    },
    RosterEntry {
        name: "Robert Miller",
        destination: "Stadium",
        category: FareCategory::Discounted,
        payment_method: PaymentMethod::Cash,
        amount_paid: "40.00",
    },
    RosterEntry {
        name: "Lisa Wilson",
        destination: "Convention Center",
        category: FareCategory::Standard,
        payment_method: PaymentMethod::Cash,
        amount_paid: "55.00",
    },
    RosterEntry {
        name: "James Taylor",
        destination: "Train Station",
        category: FareCategory::Vip,
        payment_method: PaymentMethod::Cash,
        amount_paid: "110.00",
    },
    RosterEntry {
        name: "Jennifer Anderson",
        destination: "City Center",
        category: FareCategory::Standard,
        payment_method: PaymentMethod::Cash,
        amount_paid: "48.00",
    },
    RosterEntry {
        name: "Thomas Martinez",
        destination: "Amusement Park",
        category: FareCategory::Discounted,
        payment_method: PaymentMethod::Cash,
        amount_paid: "42.00",
    },
    RosterEntry {
        name: "Susan Thompson",
        destination: "Business District",
        category: FareCategory::Standard,
        payment_method: PaymentMethod::Cash,
        amount_paid: "65.00",
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fare::minimum_fare;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[test]
    fn test_roster_has_twelve_entries() {
        assert_eq!(PREDEFINED_ROSTER.len(), 12);
    }

    #[test]
    fn test_roster_names_are_unique() {
        for (i, a) in PREDEFINED_ROSTER.iter().enumerate() {
            for b in PREDEFINED_ROSTER.iter().skip(i + 1) {
                assert_ne!((a.name, a.destination), (b.name, b.destination));
            }
        }
    }

    #[test]
    fn test_roster_contains_underpaying_entries() {
        let short: Vec<&str> = PREDEFINED_ROSTER
            .iter()
            .filter(|entry| {
                let tendered = Decimal::from_str(entry.amount_paid).unwrap();
                tendered < minimum_fare(entry.category)
            })
            .map(|entry| entry.name)
            .collect();
        assert_eq!(short, vec!["Sarah Williams", "Jennifer Anderson"]);
    }
}
