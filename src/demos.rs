//! Canned example programs shown by the viewer and the `--example` flag

/// A titled example program
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Demo {
    pub title: &'static str,
    pub source: &'static str,
}

pub const DEMOS: [Demo; 5] = [
    Demo {
        title: "Declarations and assignments",
        source: r#"// Example 1: variable declarations and assignments
int x;
float y;
string message;
x = 10;
y = 3.14;
message = "Hello, world!";
"#,
    },
    Demo {
        title: "If-else statement",
        source: r#"// Example 2: if-else statement
int number;
number = 42;
if (number > 10) {
    print(number);
} else {
    print(0);
}
"#,
    },
    Demo {
        title: "While loop",
        source: r#"// Example 3: while loop
int counter;
counter = 1;
while (counter <= 5) {
    print(counter);
    counter = counter + 1;
}
"#,
    },
    Demo {
        title: "Input and arithmetic",
        source: r#"// Example 4: input and arithmetic
int a;
int b;
input(a);
input(b);
int sum;
sum = a + b;
int product;
product = a * b;
print(sum);
print(product);
"#,
    },
    Demo {
        title: "Syntax errors",
        source: r#"// Example 5: contains syntax errors
int x;
x = 10;
if x > 5) { // missing opening parenthesis
    print(x)  // missing semicolon
}
"#,
    },
];

/// Example by 1-based number.
pub fn demo(number: usize) -> Option<&'static Demo> {
    number.checked_sub(1).and_then(|index| DEMOS.get(index))
}
