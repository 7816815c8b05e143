//! Interactive prompt helpers shared by the operator tools

use alloy_primitives::Address;
use eyre::{eyre, Result};
use std::io::{self, BufRead, Write};
use std::str::FromStr;

/// General function to prompt for input with a specific message
///
/// Errors once the input is exhausted, so callers that loop on invalid input
/// terminate when stdin is closed
pub fn prompt_for_input(prompt: &str) -> io::Result<String> {
    read_input(&mut io::stdin().lock(), prompt)
}

/// Prompt for input, falling back to `default` when the operator just hits enter
pub fn prompt_with_default(prompt: &str, default: &str) -> io::Result<String> {
    let input = prompt_for_input(&format!("{} [{}]", prompt, default))?;
    if input.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(input)
    }
}

/// Prompt the user to pick one of `options`, returning its 0-based index
///
/// Options are displayed numbered from 1, the way the operator types them
pub fn prompt_for_menu_choice(prompt: &str, options: &[&str]) -> Result<usize> {
    read_menu_choice(&mut io::stdin().lock(), prompt, options)
}

/// Parse a 1-based menu selection into a 0-based index
pub fn parse_menu_choice(input: &str, num_options: usize) -> Option<usize> {
    let choice = input.trim().parse::<usize>().ok()?;
    (1..=num_options).contains(&choice).then(|| choice - 1)
}

/// Prompt the user for a yes/no answer with a default value
pub fn prompt_for_bool(prompt: &str, default: bool) -> Result<bool> {
    let hint = if default { "Y/n" } else { "y/N" };
    loop {
        let input = prompt_for_input(&format!("{} [{}]", prompt, hint))?;
        match input.to_lowercase().as_str() {
            "" => return Ok(default),
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => println!("Please answer `y` or `n`."),
        }
    }
}

/// Function to prompt user for a valid Ethereum address
pub fn prompt_for_eth_address(prompt: &str) -> Result<String> {
    read_eth_address(&mut io::stdin().lock(), prompt)
}

/// Function to validate an Ethereum address format
pub fn is_valid_eth_address_format(address: &str) -> bool {
    Address::from_str(address).is_ok()
}

// -----------
// | Readers |
// -----------

/// Print `prompt` and read one trimmed line from `reader`
fn read_input<R: BufRead>(reader: &mut R, prompt: &str) -> io::Result<String> {
    print!("{}: ", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    if reader.read_line(&mut input)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "no input"));
    }

    Ok(input.trim().to_string())
}

fn read_menu_choice<R: BufRead>(reader: &mut R, prompt: &str, options: &[&str]) -> Result<usize> {
    if options.is_empty() {
        return Err(eyre!("no options to choose from"));
    }

    println!("{}:", prompt);
    for (i, option) in options.iter().enumerate() {
        println!(" {}. {}", i + 1, option);
    }

    loop {
        let input = read_input(reader, "Option")?;
        match parse_menu_choice(&input, options.len()) {
            Some(choice) => return Ok(choice),
            None => println!(
                "Invalid option. Please enter a number between 1 and {}.",
                options.len()
            ),
        }
    }
}

fn read_eth_address<R: BufRead>(reader: &mut R, prompt: &str) -> Result<String> {
    loop {
        let input = read_input(reader, prompt)?;

        if is_valid_eth_address_format(&input) {
            return Ok(input);
        } else {
            println!(
                "Invalid Ethereum address format. Please enter a valid address (0x followed by \
                 40 hex characters)."
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        is_valid_eth_address_format, parse_menu_choice, read_eth_address, read_input,
        read_menu_choice,
    };

    const OPTIONS: [&str; 2] = ["Deploy", "Upgrade"];

    #[test]
    fn test_menu_choice_is_one_based() {
        assert_eq!(parse_menu_choice("1", 3), Some(0));
        assert_eq!(parse_menu_choice(" 3 ", 3), Some(2));
    }

    #[test]
    fn test_menu_choice_out_of_range() {
        assert_eq!(parse_menu_choice("0", 3), None);
        assert_eq!(parse_menu_choice("4", 3), None);
        assert_eq!(parse_menu_choice("deploy", 3), None);
    }

    #[test]
    fn test_eth_address_format() {
        assert!(is_valid_eth_address_format(
            "0x70997970C51812dc3A010C7d01b50e0d17dc79C8"
        ));
        assert!(!is_valid_eth_address_format("0x1234"));
        assert!(!is_valid_eth_address_format("TOKEN-abcdef"));
    }

    #[test]
    fn test_closed_input_errors() {
        let mut empty: &[u8] = b"";
        assert!(read_input(&mut empty, "Option").is_err());

        // A bare newline is an empty answer, not the end of input
        let mut newline: &[u8] = b"\n";
        assert_eq!(read_input(&mut newline, "Option").unwrap(), "");
    }

    #[test]
    fn test_menu_retries_then_stops_at_end_of_input() {
        let mut input: &[u8] = b"7\n\n2\n";
        assert_eq!(read_menu_choice(&mut input, "Choose", &OPTIONS).unwrap(), 1);

        let mut input: &[u8] = b"7\n";
        assert!(read_menu_choice(&mut input, "Choose", &OPTIONS).is_err());

        let mut empty: &[u8] = b"";
        assert!(read_menu_choice(&mut empty, "Choose", &OPTIONS).is_err());
    }

    #[test]
    fn test_eth_address_stops_at_end_of_input() {
        let mut input: &[u8] = b"0x1234\n0x70997970C51812dc3A010C7d01b50e0d17dc79C8\n";
        assert_eq!(
            read_eth_address(&mut input, "Reward token").unwrap(),
            "0x70997970C51812dc3A010C7d01b50e0d17dc79C8"
        );

        let mut input: &[u8] = b"not-an-address\n";
        assert!(read_eth_address(&mut input, "Reward token").is_err());
    }
}
