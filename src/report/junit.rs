use super::types::TestResults;
use anyhow::Result;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Cursor;
use std::path::Path;

/// Generate JUnit XML report string from TestResults
pub fn generate_junit_xml(results: &TestResults) -> Result<String> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let total = results.summary.total;
    let failures = results.summary.failed;

    // <testsuites>
    let mut suites_start = BytesStart::new("testsuites");
    suites_start.push_attribute(("name", "shopsmoke-run"));
    suites_start.push_attribute(("tests", total.to_string().as_str()));
    suites_start.push_attribute(("failures", failures.to_string().as_str()));
    writer.write_event(Event::Start(suites_start))?;

    // Single <testsuite>: one run is one ordered sequence of cases
    let mut suite_start = BytesStart::new("testsuite");
    suite_start.push_attribute(("name", results.base_url.as_str()));
    suite_start.push_attribute(("tests", total.to_string().as_str()));
    suite_start.push_attribute(("failures", failures.to_string().as_str()));
    suite_start.push_attribute(("timestamp", results.generated_at.as_str()));
    writer.write_event(Event::Start(suite_start))?;

    for case in &results.results {
        let mut case_start = BytesStart::new("testcase");
        case_start.push_attribute(("name", case.name.as_str()));
        case_start.push_attribute(("classname", "shopsmoke.api"));
        writer.write_event(Event::Start(case_start))?;

        if !case.passed {
            let mut fail_start = BytesStart::new("failure");
            fail_start.push_attribute(("message", case.message.as_str()));
            fail_start.push_attribute(("type", "AssertionError"));
            writer.write_event(Event::Start(fail_start))?;
            writer.write_event(Event::Text(BytesText::new(&case.message)))?;
            writer.write_event(Event::End(BytesEnd::new("failure")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("testcase")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("testsuite")))?;
    writer.write_event(Event::End(BytesEnd::new("testsuites")))?;

    let result = writer.into_inner().into_inner();
    let xml = String::from_utf8(result)?;
    Ok(xml)
}

/// Generate JUnit report
pub async fn generate(results: &TestResults, output: Option<&Path>) -> Result<()> {
    let xml = generate_junit_xml(results)?;

    if let Some(path) = output {
        std::fs::write(path, xml)?;
        println!("JUnit report saved to: {}", path.display());
    } else {
        println!("{}", xml);
    }

    Ok(())
}
