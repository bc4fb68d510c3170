//! Interactive operator menu over any line-oriented reader and writer.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

use dispatch_core::{DispatchService, DriverId, Point};
use tracing::debug;

use crate::render::{self, OutputFormat};

const MENU: &str = "1.Add Driver 2.Add Rider 3.Dispatch 4.Complete Ride 5.Show Drivers \
                    6.Show Riders 7.Show Rides 8.Show Stats 0.Exit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddDriver,
    AddRider,
    Dispatch,
    CompleteRide,
    ShowDrivers,
    ShowRiders,
    ShowRides,
    ShowStats,
    Exit,
}

impl FromStr for MenuChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1" => Ok(MenuChoice::AddDriver),
            "2" => Ok(MenuChoice::AddRider),
            "3" => Ok(MenuChoice::Dispatch),
            "4" => Ok(MenuChoice::CompleteRide),
            "5" => Ok(MenuChoice::ShowDrivers),
            "6" => Ok(MenuChoice::ShowRiders),
            "7" => Ok(MenuChoice::ShowRides),
            "8" => Ok(MenuChoice::ShowStats),
            "0" => Ok(MenuChoice::Exit),
            other => Err(format!("Invalid choice '{other}'.")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Menu session. Tokens left over on a line feed the next prompt.
pub struct Console<R, W> {
    service: DispatchService,
    input: R,
    output: W,
    format: OutputFormat,
    pending: VecDeque<String>,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(service: DispatchService, input: R, output: W, format: OutputFormat) -> Self {
        Self {
            service,
            input,
            output,
            format,
            pending: VecDeque::new(),
        }
    }

    pub fn service(&self) -> &DispatchService {
        &self.service
    }

    pub fn into_parts(self) -> (DispatchService, W) {
        (self.service, self.output)
    }

    /// Run until Exit or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            writeln!(self.output, "\n{MENU}")?;
            let Some(token) = self.next_token(Some("> "))? else {
                return Ok(());
            };
            let choice = match token.parse::<MenuChoice>() {
                Ok(choice) => choice,
                Err(message) => {
                    writeln!(self.output, "{message}")?;
                    continue;
                }
            };
            debug!(?choice, "menu choice");
            if self.handle(choice)? == Flow::Exit {
                return Ok(());
            }
        }
    }

    fn handle(&mut self, choice: MenuChoice) -> io::Result<Flow> {
        match choice {
            MenuChoice::AddDriver => self.add_driver(),
            MenuChoice::AddRider => self.add_rider(),
            MenuChoice::Dispatch => {
                let line = match self.service.dispatch() {
                    Ok(assignment) => render::assignment_line(&assignment),
                    Err(error) => error.to_string(),
                };
                writeln!(self.output, "{line}")?;
                Ok(Flow::Continue)
            }
            MenuChoice::CompleteRide => self.complete_ride(),
            MenuChoice::ShowDrivers => {
                let drivers = self.service.drivers();
                render::write_listing(
                    &mut self.output,
                    self.format,
                    &drivers,
                    render::driver_line,
                )?;
                Ok(Flow::Continue)
            }
            MenuChoice::ShowRiders => {
                let riders = self.service.waiting_riders();
                render::write_listing(&mut self.output, self.format, &riders, render::rider_line)?;
                Ok(Flow::Continue)
            }
            MenuChoice::ShowRides => {
                let rides = self.service.rides();
                render::write_listing(&mut self.output, self.format, &rides, render::ride_line)?;
                Ok(Flow::Continue)
            }
            MenuChoice::ShowStats => {
                let stats = self.service.stats();
                render::write_listing(
                    &mut self.output,
                    self.format,
                    std::slice::from_ref(&stats),
                    render::stats_line,
                )?;
                Ok(Flow::Continue)
            }
            MenuChoice::Exit => Ok(Flow::Exit),
        }
    }

    fn add_driver(&mut self) -> io::Result<Flow> {
        let Some(fields) = self.fields("Enter driver name, rating, x, y: ", 4)? else {
            return Ok(Flow::Exit);
        };
        let Some([rating, x, y]) = self.numbers::<3>(&fields[1..])? else {
            return Ok(Flow::Continue);
        };
        let line = match self
            .service
            .register_driver(fields[0].clone(), rating, Point::new(x, y))
        {
            Ok(id) => format!("Driver {id} added."),
            Err(error) => error.to_string(),
        };
        writeln!(self.output, "{line}")?;
        Ok(Flow::Continue)
    }

    fn add_rider(&mut self) -> io::Result<Flow> {
        let Some(fields) = self.fields("Enter rider name, pickupX pickupY dropX dropY: ", 5)?
        else {
            return Ok(Flow::Exit);
        };
        let Some([px, py, dx, dy]) = self.numbers::<4>(&fields[1..])? else {
            return Ok(Flow::Continue);
        };
        let line = match self.service.request_ride(
            fields[0].clone(),
            Point::new(px, py),
            Point::new(dx, dy),
        ) {
            Ok(id) => format!("Rider {id} request added."),
            Err(error) => error.to_string(),
        };
        writeln!(self.output, "{line}")?;
        Ok(Flow::Continue)
    }

    fn complete_ride(&mut self) -> io::Result<Flow> {
        let Some(fields) = self.fields("Enter driver ID: ", 1)? else {
            return Ok(Flow::Exit);
        };
        let driver = match fields[0].parse::<u64>() {
            Ok(raw) => DriverId(raw),
            Err(_) => {
                writeln!(self.output, "Invalid driver id '{}'.", fields[0])?;
                return Ok(Flow::Continue);
            }
        };
        let line = match self.service.complete_ride(driver) {
            Ok(ride) => format!("Ride {ride} completed."),
            Err(error) => error.to_string(),
        };
        writeln!(self.output, "{line}")?;
        Ok(Flow::Continue)
    }

    /// Parse every token as a finite number, reporting the first bad one.
    fn numbers<const N: usize>(&mut self, tokens: &[String]) -> io::Result<Option<[f64; N]>> {
        let mut values = [0.0; N];
        for (slot, token) in values.iter_mut().zip(tokens) {
            match token.parse::<f64>() {
                Ok(value) if value.is_finite() => *slot = value,
                _ => {
                    writeln!(self.output, "Invalid number '{token}'.")?;
                    return Ok(None);
                }
            }
        }
        Ok(Some(values))
    }

    /// Collect `count` tokens, prompting once if the current line ran short.
    /// `None` means input ended first.
    fn fields(&mut self, prompt: &str, count: usize) -> io::Result<Option<Vec<String>>> {
        let mut prompt = (self.pending.len() < count).then_some(prompt);
        let mut fields = Vec::with_capacity(count);
        while fields.len() < count {
            match self.next_token(prompt.take())? {
                Some(token) => fields.push(token),
                None => return Ok(None),
            }
        }
        Ok(Some(fields))
    }

    fn next_token(&mut self, prompt: Option<&str>) -> io::Result<Option<String>> {
        if let Some(prompt) = prompt.filter(|_| self.pending.is_empty()) {
            write!(self.output, "{prompt}")?;
            self.output.flush()?;
        }
        while self.pending.is_empty() {
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_string));
        }
        Ok(self.pending.pop_front())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dispatch_core::DispatchConfig;

    fn run_script(script: &str) -> (DispatchService, String) {
        run_script_with(DispatchConfig::default(), OutputFormat::Text, script)
    }

    fn run_script_with(
        config: DispatchConfig,
        format: OutputFormat,
        script: &str,
    ) -> (DispatchService, String) {
        let mut console = Console::new(
            DispatchService::new(config),
            script.as_bytes(),
            Vec::new(),
            format,
        );
        console.run().expect("console run");
        let (service, output) = console.into_parts();
        (service, String::from_utf8(output).expect("utf8 output"))
    }

    #[test]
    fn tie_break_scenario_through_menu() {
        let (service, out) =
            run_script("1 D1 4.5 0 0\n1 D2 4.9 0 0\n2 R1 0 0 5 5\n3\n4 2\n4 2\n0\n");

        assert!(out.contains("Driver 1 added."));
        assert!(out.contains("Driver 2 added."));
        assert!(out.contains("Rider 1 request added."));
        assert!(out.contains("Driver D2 assigned to Rider R1 (dist=0.00)"));
        assert!(out.contains("Ride 1 completed."));
        assert!(out.contains("No ongoing ride for driver 2."));
        assert_eq!(service.stats().completed, 1);
    }

    #[test]
    fn prompts_for_missing_arguments_across_lines() {
        let (service, out) = run_script("1\nana 4.0\n3 4\n5\n");

        assert!(out.contains("Enter driver name, rating, x, y: "));
        assert!(out.contains("Driver 1 - ana (rating 4.0) Available"));
        assert_eq!(
            service.driver(DriverId(1)).map(|d| d.location),
            Some(Point::new(3.0, 4.0))
        );
    }

    #[test]
    fn failures_are_reported_and_menu_continues() {
        let (service, out) = run_script("3\n2 r 1 1 2 2\n3\n9\n1 bad x 0 0\n4 abc\n6\n");

        assert!(out.contains("No riders waiting."));
        assert!(out.contains("No drivers available."));
        assert!(out.contains("Invalid choice '9'."));
        assert!(out.contains("Invalid number 'x'."));
        assert!(out.contains("Invalid driver id 'abc'."));
        assert!(out.contains("Rider 1 - r pickup(1.0,1.0) dropoff(2.0,2.0)"));
        assert!(service.drivers().is_empty());
    }

    #[test]
    fn non_finite_numbers_are_rejected() {
        let (service, out) = run_script("1 d 4 nan 0\n1 e inf 0 0\n2 r 0 0 -inf 1\n0\n");

        assert!(out.contains("Invalid number 'nan'."));
        assert!(out.contains("Invalid number 'inf'."));
        assert!(out.contains("Invalid number '-inf'."));
        assert!(service.drivers().is_empty());
        assert!(service.waiting_riders().is_empty());
    }

    #[test]
    fn capacity_rejection_is_printed() {
        let (_, out) = run_script_with(
            DispatchConfig::default().with_max_drivers(1),
            OutputFormat::Text,
            "1 a 4 0 0\n1 b 4 0 0\n0\n",
        );
        assert!(out.contains("driver registry is full (capacity 1)"));
    }

    #[test]
    fn json_format_renders_rides() {
        let (_, out) = run_script_with(
            DispatchConfig::default(),
            OutputFormat::Json,
            "1 d 4 3 4\n2 r 0 0 1 1\n3\n7\n0\n",
        );
        let ride_line = out
            .lines()
            .find(|line| line.starts_with('{'))
            .expect("json ride line");
        let ride: serde_json::Value = serde_json::from_str(ride_line).expect("ride json");
        assert_eq!(ride["status"], "ongoing");
        assert_eq!(ride["pickup_distance"], 5.0);
    }
}
