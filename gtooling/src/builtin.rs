//! Built-in gateway tools: current time and canned weather lookups.
//!
//! Both tools report lookup misses as ordinary text output rather than
//! errors, so a model asking about an unknown city still gets an answer
//! it can relay.

use chrono::Utc;
use chrono_tz::Tz;

use crate::args::ToolArgs;
use crate::error::ToolError;
use crate::registry::ToolRegistry;
use crate::tool::{Tool, ToolFuture};
use crate::types::{
    ParameterSchema, ParameterSpec, ParameterType, ToolDescriptor, ToolExecutionContext,
};

const WEATHER_BY_CITY: &[(&str, &str)] = &[
    ("new york", "Sunny, 72°F"),
    ("london", "Rainy, 55°F"),
    ("tokyo", "Cloudy, 65°F"),
    ("paris", "Partly cloudy, 62°F"),
    ("sydney", "Clear, 78°F"),
];

/// Reports the current time in a requested timezone or city.
#[derive(Debug, Default, Clone, Copy)]
pub struct CurrentTimeTool;

impl Tool for CurrentTimeTool {
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor::new(
            "get_current_time",
            "Returns the current date and time for a city or IANA timezone",
            ParameterSchema::new(vec![
                ParameterSpec::optional("city", ParameterType::Text),
                ParameterSpec::optional("timezone", ParameterType::Text),
            ]),
        )
    }

    fn invoke<'a>(
        &'a self,
        args: &'a ToolArgs,
        _context: &'a ToolExecutionContext,
    ) -> ToolFuture<'a, Result<String, ToolError>> {
        Box::pin(async move {
            Ok(current_time_report(
                args.text("city").unwrap_or_default(),
                args.text("timezone").unwrap_or_default(),
            ))
        })
    }
}

fn resolve_zone(city: &str, timezone: &str) -> Option<Tz> {
    if let Ok(zone) = timezone.trim().parse::<Tz>() {
        return Some(zone);
    }

    city.trim().parse::<Tz>().ok()
}

fn current_time_report(city: &str, timezone: &str) -> String {
    match resolve_zone(city, timezone) {
        Some(zone) => {
            let now = Utc::now().with_timezone(&zone);
            let place = if city.trim().is_empty() {
                zone.name()
            } else {
                city.trim()
            };
            format!("Current time in {}: {}", place, now.format("%Y-%m-%d %H:%M:%S %Z"))
        }
        None => {
            let wanted = if timezone.trim().is_empty() {
                city.trim()
            } else {
                timezone.trim()
            };
            format!("Could not determine the current time: unknown timezone '{wanted}'")
        }
    }
}

/// Looks up canned weather conditions for a small fixed set of cities.
#[derive(Debug, Default, Clone, Copy)]
pub struct WeatherTool;

impl Tool for WeatherTool {
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor::new(
            "get_weather",
            "Returns current weather conditions for a city",
            ParameterSchema::new(vec![ParameterSpec::required("city", ParameterType::Text)]),
        )
    }

    fn invoke<'a>(
        &'a self,
        args: &'a ToolArgs,
        _context: &'a ToolExecutionContext,
    ) -> ToolFuture<'a, Result<String, ToolError>> {
        Box::pin(async move { Ok(weather_report(args.text("city").unwrap_or_default())) })
    }
}

fn weather_report(city: &str) -> String {
    let trimmed = city.trim();
    let key = trimmed.to_lowercase();

    WEATHER_BY_CITY
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, conditions)| (*conditions).to_string())
        .unwrap_or_else(|| format!("Weather data not available for {trimmed}"))
}

/// Registry preloaded with the built-in tools, time first.
pub fn builtin_registry() -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(CurrentTimeTool);
    registry.register(WeatherTool);
    registry
}
