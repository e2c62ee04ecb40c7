quantity!(KilowattHours, f64, "kWh");

impl KilowattHours {
    #[must_use]
    pub const fn abs(self) -> Self {
        Self(self.0.abs())
    }
}
