use std::fmt;

use lin_reg::LinearModel;

/// Competitive programming sites whose ratings are related by the model.
/// The model maps CodeChef ratings onto Codeforces ratings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    CodeChef,
    Codeforces,
}

impl Platform {
    /// The platform converted to
    pub fn other(self) -> Self {
        match self {
            Self::CodeChef => Self::Codeforces,
            Self::Codeforces => Self::CodeChef,
        }
    }

    /// Rank title or star count held at `rating`
    pub fn title(self, rating: f64) -> &'static str {
        match self {
            Self::Codeforces => match rating {
                r if r <= 999.0 => "Newbie",
                r if r <= 1199.0 => "Pupil",
                r if r <= 1399.0 => "Apprentice",
                r if r <= 1599.0 => "Specialist",
                r if r <= 1799.0 => "Expert",
                r if r <= 1999.0 => "Candidate Master",
                r if r <= 2199.0 => "Master",
                r if r <= 2399.0 => "International Master",
                r if r <= 2699.0 => "Grandmaster",
                r if r <= 2999.0 => "International Grandmaster",
                _ => "Legendary Grandmaster",
            },
            Self::CodeChef => match rating {
                r if r <= 1399.0 => "1 star",
                r if r <= 1599.0 => "2 star",
                r if r <= 1799.0 => "3 star",
                r if r <= 1999.0 => "4 star",
                r if r <= 2199.0 => "5 star",
                r if r <= 2499.0 => "6 star",
                _ => "7 star",
            },
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CodeChef => write!(f, "CodeChef"),
            Self::Codeforces => write!(f, "Codeforces"),
        }
    }
}

/// A rating carried over to the other platform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Conversion {
    pub from: Platform,
    pub to: Platform,
    pub input: f64,
    /// Rounded to the nearest integer
    pub rating: f64,
    pub title: &'static str,
}

/// Convert `rating` on `from` to the other platform. Going from Codeforces
/// uses the inverse of the model, which fails for a zero weight.
pub fn convert(model: &LinearModel, from: Platform, rating: f64) -> lin_reg::Result<Conversion> {
    let predicted = match from {
        Platform::CodeChef => model.predict_forward(rating),
        Platform::Codeforces => model.predict_inverse(rating)?,
    };
    let to = from.other();
    // halves round up, as on the converter website
    let rating_out = (predicted + 0.5).floor();

    Ok(Conversion {
        from,
        to,
        input: rating,
        rating: rating_out,
        title: to.title(rating_out),
    })
}

impl fmt::Display for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rating < 0.0 {
            write!(
                f,
                "{} {} -> {} {} (negative rating is unexpected)",
                self.from, self.input, self.to, self.rating
            )
        } else {
            write!(
                f,
                "{} {} -> {} {}, likely title: {}",
                self.from, self.input, self.to, self.rating, self.title
            )
        }
    }
}
