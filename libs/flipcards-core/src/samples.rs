//! Built-in sample subjects loaded on a fresh start.

use crate::types::{Card, Subject};

fn card(question: &str, answer: &str) -> Card {
    Card {
        question: question.to_string(),
        answer: answer.to_string(),
    }
}

fn subject(name: &str, cards: Vec<Card>) -> Subject {
    Subject {
        name: name.to_string(),
        cards,
    }
}

pub(crate) fn subjects() -> Vec<Subject> {
    vec![
        subject(
            "JavaScript Basics",
            vec![
                card(
                    "What is a closure in JavaScript?",
                    "A function that has access to variables in its outer (enclosing) scope even after the outer function has returned.",
                ),
                card(
                    "What is the difference between let and var?",
                    "let has block scope and cannot be redeclared, while var has function scope and can be redeclared.",
                ),
                card(
                    "What is the event loop?",
                    "A mechanism that handles asynchronous operations by moving completed tasks from the callback queue to the call stack.",
                ),
                card(
                    "What is hoisting?",
                    "JavaScript's behavior of moving variable and function declarations to the top of their scope during compilation.",
                ),
                card(
                    "What is a Promise?",
                    "An object representing the eventual completion or failure of an asynchronous operation.",
                ),
                card(
                    "What is destructuring?",
                    "A syntax that allows unpacking values from arrays or properties from objects into distinct variables.",
                ),
                card(
                    "What is the spread operator?",
                    "The ... operator that expands an iterable into individual elements or copies properties from one object to another.",
                ),
                card(
                    "What is async/await?",
                    "Syntax that makes it easier to work with Promises by allowing asynchronous code to be written in a synchronous style.",
                ),
            ],
        ),
        subject(
            "React Fundamentals",
            vec![
                card(
                    "What is JSX?",
                    "A syntax extension for JavaScript that allows you to write HTML-like code in your JavaScript files.",
                ),
                card(
                    "What is a React component?",
                    "A reusable piece of UI that can accept props and return JSX elements.",
                ),
                card(
                    "What is the difference between state and props?",
                    "State is internal data that a component manages, while props are external data passed to a component from its parent.",
                ),
                card(
                    "What is the Virtual DOM?",
                    "A JavaScript representation of the actual DOM that React uses to optimize updates by comparing changes before applying them.",
                ),
            ],
        ),
        subject(
            "Python Programming",
            vec![
                card(
                    "What is a list comprehension in Python?",
                    "A concise way to create lists using a single line of code with optional conditions.",
                ),
                card(
                    "What is the difference between a tuple and a list?",
                    "Tuples are immutable and ordered, while lists are mutable and ordered.",
                ),
                card(
                    "What is a decorator in Python?",
                    "A function that takes another function and extends its behavior without explicitly modifying it.",
                ),
                card(
                    "What is the Global Interpreter Lock (GIL)?",
                    "A mutex that protects access to Python objects, preventing multiple threads from executing Python bytecodes simultaneously.",
                ),
            ],
        ),
    ]
}
