// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Bundled menus and fixed text.

use super::{Acquired, AcquisitionError, AcquisitionSource};
use crate::event::EventSink;

/// Demo menus, selectable by 1-based number.
pub const DEMO_MENUS: [&str; 3] = [
    "CAFE MENU\n\nBEVERAGES:\n• Peanut Butter Latte (contains nuts)\n• Soy Milk Cappuccino (contains soy)\n• Regular Coffee (safe)\n• Chocolate Milk (dairy)\n\nPASTRIES:\n• Almond Croissant (nuts, dairy, gluten)\n• Vegan Muffin (gluten-free, nut-free)\n• Cheese Danish (dairy, gluten)\n• Banana Bread (nuts optional)\n\nDESSERTS:\n• Chocolate Cake (dairy, gluten)\n• Fruit Salad (safe)\n• Nutella Crepe (nuts, dairy, gluten)",
    "ITALIAN RESTAURANT\n\nAPPETIZERS:\n• Bruschetta (gluten, garlic)\n• Calamari (shellfish)\n• Cheese Platter (dairy)\n• Antipasto (contains various allergens)\n\nMAIN COURSES:\n• Spaghetti Carbonara (eggs, dairy, gluten)\n• Margherita Pizza (gluten, dairy)\n• Seafood Linguine (shellfish, gluten)\n• Chicken Parmesan (dairy, gluten)\n• Eggplant Parmigiana (dairy, gluten)\n\nDESSERTS:\n• Tiramisu (dairy, eggs, gluten, alcohol)\n• Gelato (dairy)\n• Panna Cotta (dairy, gelatin)",
    "HEALTH CAFE\n\nBOWLS:\n• Superfood Bowl with nuts (nuts, optional dairy)\n• Quinoa Salad (gluten-free, vegan)\n• Buddha Bowl (soy, sesame)\n\nSANDWICHES:\n• Avocado Toast (gluten)\n• Chicken Salad Sandwich (dairy, gluten)\n• Tofu Wrap (soy, gluten)\n• Veggie Panini (dairy, gluten)\n\nSMOOTHIES:\n• Berry Blast (soy milk option)\n• Green Detox (contains celery)\n• Protein Shake (whey/dairy)\n• Tropical Paradise (coconut)",
];

/// Sample text returned when no OCR backend is available.
pub const SIMULATED_MENUS: [&str; 2] = [
    "CAFE MENU\n\nDrinks:\n• Peanut Butter Coffee (nuts)\n• Soy Latte (soy)\n• Hot Chocolate (dairy)\n\nFood:\n• Almond Cake (nuts, gluten)\n• Cheese Sandwich (dairy, gluten)\n• Fruit Bowl (safe)",
    "RESTAURANT MENU\n\nStarters:\n• Shrimp Cocktail (shellfish)\n• Bread Basket (gluten)\n\nMains:\n• Fish & Chips (fish, gluten)\n• Veggie Curry (nuts optional)\n• Steak (safe)\n\nDesserts:\n• Cheesecake (dairy, gluten)\n• Ice Cream (dairy)",
];

/// One of the bundled demo menus.
#[derive(Debug, Clone, Copy)]
pub struct DemoMenu {
    number: usize,
}

impl DemoMenu {
    /// Select menu `number` (1-based).
    pub fn new(number: usize) -> Result<Self, AcquisitionError> {
        if (1..=DEMO_MENUS.len()).contains(&number) {
            Ok(Self { number })
        } else {
            Err(AcquisitionError::UnknownDemo {
                requested: number,
                available: DEMO_MENUS.len(),
            })
        }
    }

    pub fn number(&self) -> usize {
        self.number
    }

    pub fn text(&self) -> &'static str {
        DEMO_MENUS[self.number - 1]
    }
}

impl AcquisitionSource for DemoMenu {
    fn name(&self) -> &str {
        "demo"
    }

    fn acquire(&mut self, events: &EventSink) -> Result<Acquired, AcquisitionError> {
        events.progress("Loading demo menu...", 50);
        Ok(Acquired::new(self.text()))
    }
}

/// Stand-in OCR that cycles through [`SIMULATED_MENUS`].
#[derive(Debug, Clone, Copy)]
pub struct SimulatedOcr {
    next: usize,
}

impl SimulatedOcr {
    /// Start at the menu selected by `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            next: (seed % SIMULATED_MENUS.len() as u64) as usize,
        }
    }
}

impl AcquisitionSource for SimulatedOcr {
    fn name(&self) -> &str {
        "simulated-ocr"
    }

    fn acquire(&mut self, events: &EventSink) -> Result<Acquired, AcquisitionError> {
        events.progress("Processing image...", 20);
        let text = SIMULATED_MENUS[self.next];
        self.next = (self.next + 1) % SIMULATED_MENUS.len();
        events.progress("Using simulated text...", 60);
        Ok(Acquired::new(text))
    }
}

/// Caller-provided text, optionally with a measured confidence.
#[derive(Debug, Clone)]
pub struct StaticText {
    acquired: Acquired,
}

impl StaticText {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            acquired: Acquired::new(text),
        }
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.acquired.confidence = Some(confidence);
        self
    }
}

impl AcquisitionSource for StaticText {
    fn name(&self) -> &str {
        "static"
    }

    fn acquire(&mut self, _events: &EventSink) -> Result<Acquired, AcquisitionError> {
        Ok(self.acquired.clone())
    }
}

#[cfg(test)]
#[path = "demo_tests.rs"]
mod tests;
