use ferrous_resolve_application::ClientResponse;
use ferrous_resolve_domain::{DomainName, Record};
use std::net::IpAddr;

pub fn print_addresses(addresses: &[IpAddr]) {
    for address in addresses {
        println!("{}", address);
    }
}

pub fn print_name(name: &DomainName) {
    println!("{}", name);
}

/// Prints a response in the layout `dig` uses.
pub fn print_response(response: &ClientResponse) {
    let header = response.message().header();
    println!(
        ";; ->>HEADER<<- opcode: {}, status: {}, id: {}",
        header.opcode, header.response_code, header.id
    );

    let flags: Vec<&str> = [
        (header.response, "qr"),
        (header.authoritative, "aa"),
        (header.truncated, "tc"),
        (header.recursion_desired, "rd"),
        (header.recursion_available, "ra"),
    ]
    .into_iter()
    .filter_map(|(set, flag)| set.then_some(flag))
    .collect();
    println!(
        ";; flags: {}; QUERY: {}, ANSWER: {}, AUTHORITY: {}, ADDITIONAL: {}",
        flags.join(" "),
        response.questions().len(),
        response.answers().len(),
        response.authorities().len(),
        response.additionals().len()
    );

    println!();
    println!(";; QUESTION SECTION:");
    for question in response.questions() {
        println!(";{}.\t\t{}\t{}", question.name, question.class, question.record_type);
    }

    print_section("ANSWER", response.answers());
    print_section("AUTHORITY", response.authorities());
    print_section("ADDITIONAL", response.additionals());

    println!();
    println!(";; SERVER: {}", response.source());
    println!(";; MSG SIZE  rcvd: {}", response.size());
}

fn print_section(title: &str, records: &[Record]) {
    if records.is_empty() {
        return;
    }
    println!();
    println!(";; {} SECTION:", title);
    for record in records {
        println!("{}", record);
    }
}
