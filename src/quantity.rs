#[macro_use]
mod macros;

quantity!(Watts, suffix: "W", precision: 0);
quantity!(Kilowatts, suffix: "kW", precision: 3);
quantity!(KilowattHours, suffix: "kWh", precision: 3);

impl From<Kilowatts> for Watts {
    fn from(kilowatts: Kilowatts) -> Self {
        Self(kilowatts.0 * 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_ok() {
        assert_eq!(Kilowatts(1.5).to_string(), "1.500 kW");
        assert_eq!(Watts::from(Kilowatts(1.5)).to_string(), "1500 W");
        assert_eq!(KilowattHours(3.0).to_string(), "3.000 kWh");
    }

    #[test]
    fn ordering_ok() {
        assert!(Kilowatts(1.0) < Kilowatts(2.0));
        assert_eq!(Kilowatts(f64::NAN), Kilowatts(f64::NAN));
        assert_eq!([Kilowatts(2.0), Kilowatts(1.0)].into_iter().max(), Some(Kilowatts(2.0)));
    }
}
