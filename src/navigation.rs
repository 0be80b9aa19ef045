#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Login,
    Signup,
    ExpenseHome,
}

impl Screen {
    pub fn title(&self) -> &'static str {
        match self {
            Screen::Home => "Home",
            Screen::Login => "Login",
            Screen::Signup => "Signup",
            Screen::ExpenseHome => "Expense Home",
        }
    }

    /// Destinations offered on the home menu.
    pub fn menu() -> Vec<Screen> {
        vec![Screen::Login, Screen::Signup, Screen::ExpenseHome]
    }
}

/// What the expense screen needs from navigation.
pub trait NavigateHome {
    fn navigate_home(&mut self);
}

/// Stack navigator rooted at [`Screen::Home`].
#[derive(Debug, Clone)]
pub struct Navigator {
    stack: Vec<Screen>,
}

impl Default for Navigator {
    fn default() -> Self {
        Navigator { stack: vec![Screen::Home] }
    }
}

impl Navigator {
    pub fn current(&self) -> Screen {
        *self.stack.last().unwrap_or(&Screen::Home)
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Pops back to `screen` if it is already on the stack, else pushes it.
    pub fn navigate(&mut self, screen: Screen) {
        match self.stack.iter().position(|s| *s == screen) {
            Some(index) => self.stack.truncate(index + 1),
            None => self.stack.push(screen),
        }
    }

    pub fn go_back(&mut self) -> bool {
        if self.stack.len() > 1 {
            self.stack.pop();
            true
        } else {
            false
        }
    }
}

impl NavigateHome for Navigator {
    fn navigate_home(&mut self) {
        self.navigate(Screen::Home);
    }
}
