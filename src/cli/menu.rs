use std::fmt;

use crate::cli::session::SessionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum MenuChoice {
    ViewProducts = 1,
    AddToCart = 2,
    ViewCart = 3,
    RemoveFromCart = 4,
    Checkout = 5,
    Exit = 6,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 6] = [
        MenuChoice::ViewProducts,
        MenuChoice::AddToCart,
        MenuChoice::ViewCart,
        MenuChoice::RemoveFromCart,
        MenuChoice::Checkout,
        MenuChoice::Exit,
    ];

    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuChoice::ViewProducts => "View Products",
            MenuChoice::AddToCart => "Add Product to Cart",
            MenuChoice::ViewCart => "View Cart",
            MenuChoice::RemoveFromCart => "Remove Product from Cart",
            MenuChoice::Checkout => "Checkout",
            MenuChoice::Exit => "Exit",
        }
    }
}

impl TryFrom<i64> for MenuChoice {
    type Error = SessionError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(MenuChoice::ViewProducts),
            2 => Ok(MenuChoice::AddToCart),
            3 => Ok(MenuChoice::ViewCart),
            4 => Ok(MenuChoice::RemoveFromCart),
            5 => Ok(MenuChoice::Checkout),
            6 => Ok(MenuChoice::Exit),
            other => Err(SessionError::InvalidChoice { choice: other }),
        }
    }
}

impl fmt::Display for MenuChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.number(), self.label())
    }
}
