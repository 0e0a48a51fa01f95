//! Interactive widget trait extending ratatui's `StatefulWidget`.

use ratatui::widgets::StatefulWidget;

/// `StatefulWidget` that also owns how its state is fed and how it reacts to
/// input.
///
/// ```ignore
/// struct Counter { value: i32 }
/// struct CounterWidget;
///
/// impl InteractiveStatefulWidget for CounterWidget {
///     type Input = i32;
///     type Event = KeyEvent;
///
///     fn update_state(state: &mut Counter, input: i32) {
///         state.value = input;
///     }
/// }
/// ```
pub trait InteractiveStatefulWidget: StatefulWidget {
    /// Input data type for updating state.
    type Input;
    /// Event type for handling (use `()` for non-interactive widgets).
    type Event;

    /// Update the widget's state with new input data.
    fn update_state(state: &mut Self::State, input: Self::Input);

    /// Handle an event. Returns true if the event was consumed.
    fn handle_event(_state: &mut Self::State, _event: Self::Event) -> bool {
        false
    }
}
