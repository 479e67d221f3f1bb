//! Inspirational quotes for the start screen.

/// A quote and who said it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    pub text: &'static str,
    pub author: &'static str,
}

pub const QUOTES: &[Quote] = &[
    Quote {
        text: "Ideas are the beginning points of all fortunes.",
        author: "Napoleon Hill",
    },
    Quote {
        text: "The best way to have a good idea is to have lots of ideas.",
        author: "Linus Pauling",
    },
    Quote {
        text: "Ideas are worthless until you get them out of your head to see what they can do.",
        author: "Tanner Christensen",
    },
    Quote {
        text: "If you have an apple and I have an apple and we exchange these apples then you and I will still each have one apple. But if you have an idea and I have an idea and we exchange these ideas, then each of us will have two ideas.",
        author: "George Bernard Shaw",
    },
    Quote {
        text: "Ideas are like rabbits. You get a couple and learn how to handle them, and pretty soon you have a dozen.",
        author: "John Steinbeck",
    },
    Quote {
        text: "An idea that is not dangerous is unworthy of being called an idea at all.",
        author: "Oscar Wilde",
    },
    Quote {
        text: "Ideas are commodity. Execution of them is not.",
        author: "Michael Dell",
    },
    Quote {
        text: "No idea is so outlandish that it should not be considered.",
        author: "Winston Churchill",
    },
    Quote {
        text: "The air is full of ideas. They are knocking you in the head all the time. You only have to know what you want, then forget it, and go about your business. Suddenly, the idea will come through. It was there all the time.",
        author: "Henry Ford",
    },
    Quote {
        text: "One idea lights a thousand candles.",
        author: "Ralph Waldo Emerson",
    },
];

/// Pick a quote from any seed (the TUI uses the launch time)
pub fn pick(seed: u64) -> &'static Quote {
    &QUOTES[(seed % QUOTES.len() as u64) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_wraps_around() {
        assert_eq!(pick(0), &QUOTES[0]);
        assert_eq!(pick(QUOTES.len() as u64 + 1), &QUOTES[1]);
    }
}
